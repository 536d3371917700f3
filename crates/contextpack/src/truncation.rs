/// Marker appended to clamped text.
pub const TRUNCATION_MARKER: &str = "\n...[truncated]...";

/// Room reserved for the marker when clamping.
const MARKER_RESERVE: usize = 20;

/// Trim `text` and clamp it to roughly `max_chars` characters.
///
/// Text over the limit keeps its first `max_chars - 20` characters followed
/// by [`TRUNCATION_MARKER`], so the result never exceeds `max_chars`. Limits
/// too small to hold the marker get a plain cut with no marker.
/// Returns the clamped text and whether truncation happened.
pub fn clamp_text(text: &str, max_chars: usize) -> (String, bool) {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return (text.to_string(), false);
    }
    if max_chars < MARKER_RESERVE {
        return (text[..char_boundary(text, max_chars)].to_string(), true);
    }
    let keep = max_chars - MARKER_RESERVE;
    let mut result = text[..char_boundary(text, keep)].trim_end().to_string();
    result.push_str(TRUNCATION_MARKER);
    (result, true)
}

/// Byte offset of the `n`th char, or the end of `text`.
fn char_boundary(text: &str, n: usize) -> usize {
    text.char_indices()
        .nth(n)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
