use crate::normalizer::ProcessedText;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Plain-text MIME types in order of preference.
const PLAIN_TEXT_FORMATS: [&str; 3] = [
    "text/plain; charset=utf-8",
    "text/plain; charset=us-ascii",
    "text/plain",
];

/// A book record from the Gutendex catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<Person>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    /// MIME type to download URL.
    #[serde(default)]
    pub formats: HashMap<String, String>,
    #[serde(default)]
    pub download_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
}

impl Book {
    pub fn plain_text_url(&self) -> Option<&str> {
        PLAIN_TEXT_FORMATS
            .iter()
            .find_map(|mime| self.formats.get(*mime))
            .map(String::as_str)
    }

    pub fn primary_author(&self) -> &str {
        self.authors
            .first()
            .map_or("Unknown", |author| author.name.as_str())
    }
}

/// One page of catalog search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookPage {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<Book>,
}

impl BookPage {
    /// Results ordered by download count, most popular first.
    pub fn most_downloaded(&self) -> Vec<&Book> {
        let mut books: Vec<&Book> = self.results.iter().collect();
        books.sort_by(|a, b| b.download_count.cmp(&a.download_count));
        books
    }
}

/// Filters for a catalog listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookQuery {
    pub page: u32,
    /// Words matched against titles and author names.
    pub search: Option<String>,
    /// Matched against subjects and bookshelves.
    pub topic: Option<String>,
}

impl BookQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", self.page.to_string())];
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            params.push(("search", search.trim().to_string()));
        }
        if let Some(topic) = self.topic.as_deref().filter(|t| !t.trim().is_empty()) {
            params.push(("topic", topic.trim().to_string()));
        }
        params
    }
}

/// Plain listing of catalog results, one book per line.
pub fn format_listing<'a>(books: impl IntoIterator<Item = &'a Book>) -> String {
    let mut out = String::new();
    for book in books {
        out.push_str(&format!(
            "{:>6}  {} by {} ({} downloads)\n",
            book.id,
            book.title,
            book.primary_author(),
            book.download_count
        ));
    }
    out
}

/// Header block placed above the reading copy.
pub fn format_metadata(book: Option<&Book>, processed: &ProcessedText) -> String {
    let mut lines = Vec::new();

    if let Some(book) = book {
        lines.push(format!("# {}", book.title));
        lines.push(String::new());
        lines.push(format!("**Author:** {}", book.primary_author()));
        lines.push(format!("**Downloads:** {}", book.download_count));
        if !book.languages.is_empty() {
            lines.push(format!("**Language:** {}", book.languages.join(", ")));
        }
    }

    lines.push(format!(
        "**Est. Reading Time:** {} minutes",
        processed.reading_minutes
    ));
    if !processed.chapters.is_empty() {
        lines.push(format!(
            "**Chapters detected:** {}",
            processed.chapters.len()
        ));
    }

    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(String::new());

    lines.join("\n") + "\n"
}
