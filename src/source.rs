use crate::error::ContentError;
use crate::gutendex::{Book, BookPage, BookQuery};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Raw book text as fetched, plus the catalog record when one was consulted.
pub struct RawBook {
    pub book: Option<Book>,
    pub text: String,
}

/// Anything that can supply the raw text of a book.
pub trait TextSource {
    /// Short label used for logs and default output names.
    fn describe(&self) -> String;
    fn fetch(&self) -> Result<RawBook, ContentError>;
}

/// A raw Gutenberg text already on disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TextSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<RawBook, ContentError> {
        let bytes = fs::read(&self.path).map_err(|source| ContentError::Io {
            path: self.path.clone(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|_| ContentError::NotUtf8 {
            path: self.path.clone(),
        })?;

        debug!(path = %self.path.display(), bytes = text.len(), "read raw text");
        Ok(RawBook { book: None, text })
    }
}

/// Blocking client for the Gutendex catalog API.
pub struct Catalog {
    client: Client,
    base_url: String,
}

impl Catalog {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ContentError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("classicreads/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn book_url(&self, id: u64) -> String {
        format!("{}/books/{}", self.base_url, id)
    }

    fn list_request(&self, query: &BookQuery) -> RequestBuilder {
        self.client
            .get(format!("{}/books", self.base_url))
            .query(&query.params())
    }

    pub fn book(&self, id: u64) -> Result<Book, ContentError> {
        let url = self.book_url(id);
        info!(id, %url, "fetching book metadata");

        let response = self.client.get(&url).send()?;
        check_book_status(id, &url, response.status())?;

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    pub fn list(&self, query: &BookQuery) -> Result<BookPage, ContentError> {
        let request = self.list_request(query).build()?;
        let url = request.url().to_string();
        info!(%url, "listing catalog");

        let response = self.client.execute(request)?;
        check_status(&url, response.status())?;

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    pub fn text(&self, url: &str) -> Result<String, ContentError> {
        info!(%url, "fetching plain text");

        let response = self.client.get(url).send()?;
        check_status(url, response.status())?;

        Ok(response.text()?)
    }
}

/// Metadata lookups report a missing book separately from other failures.
fn check_book_status(id: u64, url: &str, status: StatusCode) -> Result<(), ContentError> {
    if status == StatusCode::NOT_FOUND {
        warn!(id, "book not found");
        return Err(ContentError::BookNotFound { id });
    }
    check_status(url, status)
}

fn check_status(url: &str, status: StatusCode) -> Result<(), ContentError> {
    if status.is_success() {
        return Ok(());
    }
    warn!(%url, %status, "request failed");
    Err(ContentError::Status {
        url: url.to_string(),
        status,
    })
}

fn text_url(book: &Book) -> Result<&str, ContentError> {
    book.plain_text_url().ok_or_else(|| {
        warn!(id = book.id, "no plain text format available");
        ContentError::NoPlainText { id: book.id }
    })
}

/// A book looked up in the Gutendex catalog and downloaded as plain text.
pub struct GutendexSource {
    catalog: Catalog,
    id: u64,
}

impl GutendexSource {
    pub fn new(catalog: Catalog, id: u64) -> Self {
        Self { catalog, id }
    }
}

impl TextSource for GutendexSource {
    fn describe(&self) -> String {
        format!("book-{}", self.id)
    }

    fn fetch(&self) -> Result<RawBook, ContentError> {
        let book = self.catalog.book(self.id)?;
        let url = text_url(&book)?;
        debug!(id = self.id, %url, "resolved plain text url");

        let text = self.catalog.text(url)?;
        info!(id = self.id, bytes = text.len(), "fetched book content");

        Ok(RawBook {
            book: Some(book),
            text,
        })
    }
}
