use super::is_text_whitespace;

/// Assumed reading speed used for every estimate.
pub const WORDS_PER_MINUTE: usize = 200;

/// Number of tokens produced by splitting `text` on runs of whitespace.
///
/// Every whitespace run separates two tokens, so the count is the number of
/// runs plus one. Empty text and leading or trailing whitespace therefore each
/// contribute an empty token: `""` counts as one word and `" a "` as three.
pub fn word_count(text: &str) -> usize {
    let mut runs = 0;
    let mut in_whitespace = false;

    for c in text.chars() {
        if is_text_whitespace(c) {
            if !in_whitespace {
                runs += 1;
                in_whitespace = true;
            }
        } else {
            in_whitespace = false;
        }
    }

    runs + 1
}

/// Estimated reading time in whole minutes, rounded up.
pub fn estimate(text: &str) -> usize {
    word_count(text).div_ceil(WORDS_PER_MINUTE)
}

/// Approximate number of words read after scrolling `progress_percent` of the way through.
pub fn words_read(text: &str, progress_percent: f64) -> usize {
    let progress = if progress_percent.is_finite() {
        progress_percent.clamp(0.0, 100.0)
    } else {
        0.0
    };

    (progress / 100.0 * word_count(text) as f64).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_counts_as_one_word() {
        assert_eq!(word_count(""), 1);
        assert_eq!(estimate(""), 1);
    }

    #[test]
    fn surrounding_whitespace_adds_empty_tokens() {
        assert_eq!(word_count("a"), 1);
        assert_eq!(word_count(" a "), 3);
        assert_eq!(word_count("a \t\r\n b"), 2);
    }

    #[test]
    fn byte_order_mark_separates_words_but_next_line_does_not() {
        assert_eq!(word_count("a\u{feff}b"), 2);
        assert_eq!(word_count("a\u{85}b"), 1);
    }

    #[test]
    fn short_text_rounds_up_to_one_minute() {
        assert_eq!(word_count("a b c d"), 4);
        assert_eq!(estimate("a b c d"), 1);
    }

    #[test]
    fn crossing_the_reading_speed_adds_a_minute() {
        let exactly = vec!["w"; 200].join(" ");
        let one_more = vec!["w"; 201].join(" ");
        assert_eq!(estimate(&exactly), 1);
        assert_eq!(estimate(&one_more), 2);
    }

    #[test]
    fn appending_non_whitespace_never_lowers_estimate() {
        let mut text = vec!["word"; 399].join(" ");
        let before = estimate(&text);
        text.push('s');
        assert!(estimate(&text) >= before);
        text.push_str(" more");
        assert!(estimate(&text) >= before);
    }

    #[test]
    fn words_read_follows_progress() {
        let text = vec!["w"; 10].join(" ");
        assert_eq!(words_read(&text, 0.0), 0);
        assert_eq!(words_read(&text, 55.0), 5);
        assert_eq!(words_read(&text, 100.0), 10);
    }

    #[test]
    fn words_read_clamps_out_of_range_progress() {
        let text = "one two three four";
        assert_eq!(words_read(text, 250.0), 4);
        assert_eq!(words_read(text, -10.0), 0);
        assert_eq!(words_read(text, f64::NAN), 0);
    }
}
