//! Keyword and phrase classifiers.
//!
//! Every detector is a pure function over constant phrase lists. Matching
//! is whole-phrase: a phrase only counts when it is bounded by
//! non-alphanumeric characters or the string edges, so "hi" never matches
//! "this" and "rain" never matches "brain".

pub mod coding;
pub mod conversation;
pub mod detail;
pub mod location;
pub mod mood;
pub mod team;
pub mod tool;

pub use coding::is_coding_query;
pub use conversation::wants_conversation_memory;
pub use detail::detect_detail_level;
pub use location::extract_location;
pub use mood::detect_mood;
pub use team::extract_team;
pub use tool::detect_tool;

/// True if `phrase` occurs in `text` with a word boundary on both sides.
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    if phrase.is_empty() {
        return false;
    }
    let mut from = 0;
    while let Some(pos) = text[from..].find(phrase) {
        let start = from + pos;
        let end = start + phrase.len();
        let before_ok = text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = text[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
        // Step past the first char of this hit.
        from = start + text[start..].chars().next().map_or(1, char::len_utf8);
    }
    false
}

/// True if any phrase in `phrases` occurs in `text`.
pub fn contains_any(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| contains_phrase(text, p))
}
