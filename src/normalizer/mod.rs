//! Text normalization for fetched Gutenberg books.
//!
//! Everything here is a pure function of its input: no I/O, no shared state.
//! Callers clean once with [`process`] and use the result for display, so the
//! chapter offsets always point into the text the reader actually sees.

mod chapters;
mod estimate;
mod strip;

pub use chapters::{detect, ChapterMarker};
pub use estimate::{estimate, word_count, words_read, WORDS_PER_MINUTE};
pub use strip::strip;

use serde::Serialize;

/// Whitespace as browsers define it for `\s` and `trim()`: Unicode White_Space
/// plus U+FEFF, minus U+0085.
pub(crate) fn is_text_whitespace(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedText {
    pub cleaned: String,
    pub reading_minutes: usize,
    pub chapters: Vec<ChapterMarker>,
}

/// A slice of the cleaned text running from one heading to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub title: String,
    pub line: usize,
    pub text: &'a str,
}

/// Strip boilerplate, then estimate and detect chapters on the cleaned body.
pub fn process(raw: &str) -> ProcessedText {
    let cleaned = strip(raw);

    ProcessedText {
        reading_minutes: estimate(cleaned),
        chapters: detect(cleaned),
        cleaned: cleaned.to_string(),
    }
}

impl ProcessedText {
    /// Split the cleaned text at each detected heading.
    ///
    /// Non-blank text ahead of the first heading becomes a "Front Matter"
    /// section. Without any headings the whole text is a single section.
    pub fn sections(&self) -> Vec<Section<'_>> {
        let text = self.cleaned.as_str();

        let Some(first) = self.chapters.first() else {
            return vec![Section {
                title: "Full Text".to_string(),
                line: 1,
                text,
            }];
        };

        let mut sections = Vec::with_capacity(self.chapters.len() + 1);

        let front = &text[..first.byte_offset];
        if !front.trim().is_empty() {
            sections.push(Section {
                title: "Front Matter".to_string(),
                line: 1,
                text: front.trim_end(),
            });
        }

        for (i, chapter) in self.chapters.iter().enumerate() {
            let end = self
                .chapters
                .get(i + 1)
                .map_or(text.len(), |next| next.byte_offset);

            sections.push(Section {
                title: chapter.title.clone(),
                line: chapter.line,
                text: text[chapter.byte_offset..end].trim_end(),
            });
        }

        sections
    }
}
