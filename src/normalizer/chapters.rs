use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static CHAPTER_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mR)^(?:CHAPTER|Chapter|chapter)\s+(?:[IVXLCDM]+|[0-9]+)")
        .expect("chapter heading pattern is valid")
});

/// A candidate chapter heading found in cleaned text.
///
/// Detection is a line-start pattern match, so ordinary sentences that happen
/// to begin with "Chapter 3" are reported too. `heuristic` is always set to
/// make that explicit to consumers of the serialized form.
///
/// A heading may start after `\n`, `\r\n` or a lone `\r`. U+2028 and U+2029
/// are not treated as line breaks. `line` counts `\n` only, so text using bare
/// `\r` line endings reports every heading on line 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterMarker {
    pub title: String,
    /// Offset of the heading in characters (Unicode scalar values).
    pub position: usize,
    /// Offset of the heading in bytes, for slicing the text it came from.
    #[serde(rename = "byteOffset")]
    pub byte_offset: usize,
    /// 1-based line number.
    pub line: usize,
    pub heuristic: bool,
}

/// Find chapter headings in document order.
pub fn detect(text: &str) -> Vec<ChapterMarker> {
    let mut markers = Vec::new();

    // Running totals for text[..cursor], so each byte is counted once.
    let mut cursor = 0;
    let mut chars = 0;
    let mut newlines = 0;

    for heading in CHAPTER_HEADING.find_iter(text) {
        let skipped = &text[cursor..heading.start()];
        chars += skipped.chars().count();
        newlines += skipped.bytes().filter(|&b| b == b'\n').count();
        cursor = heading.start();

        markers.push(ChapterMarker {
            title: heading.as_str().to_string(),
            position: chars,
            byte_offset: heading.start(),
            line: newlines + 1,
            heuristic: true,
        });
    }

    markers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_roman_and_arabic_headings() {
        let text = "CHAPTER I\nHello\nChapter 2\nWorld";
        let markers = detect(text);

        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].title, "CHAPTER I");
        assert_eq!(markers[0].position, 0);
        assert_eq!(markers[0].line, 1);
        assert_eq!(markers[1].title, "Chapter 2");
        assert_eq!(markers[1].position, text.find("Chapter 2").unwrap());
        assert_eq!(markers[1].line, 3);
        assert!(markers.iter().all(|m| m.heuristic));
    }

    #[test]
    fn text_without_headings_yields_nothing() {
        assert!(detect("no chapters here").is_empty());
        assert!(detect("").is_empty());
    }

    #[test]
    fn headings_must_start_a_line() {
        let markers = detect("See Chapter 4 for details.\n  CHAPTER V\nchapter 12 begins");
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].title, "chapter 12");
        assert_eq!(markers[0].line, 3);
    }

    #[test]
    fn title_stops_at_the_numeral() {
        let markers = detect("CHAPTER XIV. The Trial\nChapter 7: Home\nCHAPTER ONE");
        let titles: Vec<_> = markers.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["CHAPTER XIV", "Chapter 7"]);
    }

    #[test]
    fn mid_narrative_lines_are_reported() {
        let markers = detect("He shut the book.\nChapter 1 had been dull.");
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].line, 2);
    }

    #[test]
    fn position_counts_characters_not_bytes() {
        let text = "Préface — été\nCHAPTER I\nCafé\nCHAPTER II";
        let markers = detect(text);

        assert_eq!(markers.len(), 2);
        let first = text.find("CHAPTER I").unwrap();
        assert_eq!(markers[0].byte_offset, first);
        assert_eq!(markers[0].position, text[..first].chars().count());
        assert!(markers[0].position < markers[0].byte_offset);
        assert_eq!(&text[markers[1].byte_offset..], "CHAPTER II");
        assert_eq!(markers[1].line, 4);
    }

    #[test]
    fn crlf_line_endings_keep_line_numbers() {
        let markers = detect("Title\r\n\r\nCHAPTER I\r\nText\r\nCHAPTER II\r\n");
        let lines: Vec<_> = markers.iter().map(|m| m.line).collect();
        assert_eq!(lines, [3, 5]);
    }

    #[test]
    fn bare_carriage_returns_start_lines() {
        let markers = detect("Title\rCHAPTER I\rText\rCHAPTER II");
        let titles: Vec<_> = markers.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["CHAPTER I", "CHAPTER II"]);
        assert!(markers.iter().all(|m| m.line == 1));
        assert_eq!(markers[0].position, 6);
    }

    #[test]
    fn positions_are_strictly_increasing() {
        let text = "CHAPTER I\nCHAPTER II\nCHAPTER III\n";
        let markers = detect(text);
        assert_eq!(markers.len(), 3);
        assert!(markers.windows(2).all(|w| w[0].position < w[1].position));
        assert_eq!(detect(text), markers);
    }
}
