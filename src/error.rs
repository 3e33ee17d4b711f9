use std::path::PathBuf;
use thiserror::Error;

/// Reasons a book's text could not be obtained.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Book {id} not found")]
    BookNotFound { id: u64 },

    #[error("No plain text format available for book {id}")]
    NoPlainText { id: u64 },

    #[error("Request to {url} failed with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8", path.display())]
    NotUtf8 { path: PathBuf },

    #[error("Malformed book metadata: {0}")]
    MalformedMetadata(#[from] serde_json::Error),
}

impl ContentError {
    /// True when the catalog answered but there is no readable text to show.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            ContentError::BookNotFound { .. } | ContentError::NoPlainText { .. }
        )
    }
}

/// Whether an application error was caused by a book that has no readable text.
pub fn is_content_unavailable(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ContentError>()
        .is_some_and(ContentError::is_unavailable)
}
