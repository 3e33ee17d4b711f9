use super::is_text_whitespace;

const START_MARKER: &str = "*** START OF THIS PROJECT GUTENBERG EBOOK";
const END_MARKER: &str = "*** END OF THIS PROJECT GUTENBERG EBOOK";

/// Remove the distributor header and footer around the body of a Gutenberg text.
///
/// Returns the input unchanged unless both markers are present with the start
/// marker first. Only the exact, case-sensitive marker text is recognised.
pub fn strip(raw: &str) -> &str {
    let (Some(start), Some(end)) = (raw.find(START_MARKER), raw.find(END_MARKER)) else {
        return raw;
    };

    let body_start = start + START_MARKER.len();
    if end < body_start {
        return raw;
    }

    trim(&raw[body_start..end])
}

fn trim(text: &str) -> &str {
    text.trim_matches(is_text_whitespace)
}
