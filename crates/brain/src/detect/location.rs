//! Place-name extraction for weather questions.

use super::detail::is_detail_phrase;

const PREPOSITIONS: &[&str] = &["in", "for", "at"];

const COURTESY: &[&str] = &["please", "thanks", "thank you"];

/// Trailing time phrases. Longer phrases come first so "right now" is cut
/// before "now".
const TEMPORAL: &[&str] = &[
    "right now",
    "at the moment",
    "this morning",
    "this afternoon",
    "this evening",
    "this weekend",
    "this week",
    "the weekend",
    "the week",
    "next week",
    "later today",
    "currently",
    "today",
    "tonight",
    "tomorrow",
    "now",
];

/// Time words that never make a location on their own.
const BARE_TEMPORAL: &[&str] = &["moment", "the moment", "the day", "week", "weekend"];

/// Extract a location from the raw utterance: the text after the rightmost
/// standalone `in` / `for` / `at`, stripped of trailing punctuation,
/// courtesy words and time phrases. Capitalization is preserved.
///
/// Only the rightmost preposition counts: when it introduces a time or a
/// detail phrase ("for tomorrow in detail"), no location is set.
pub fn extract_location(raw: &str) -> Option<String> {
    let (offset, word) = words_with_offsets(raw).into_iter().rev().find(|(_, word)| {
        let bare = word
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_ascii_lowercase();
        PREPOSITIONS.contains(&bare.as_str())
    })?;
    let rest = strip_trailing(&raw[offset + word.len()..]);
    is_place(rest).then(|| rest.to_string())
}

fn is_place(candidate: &str) -> bool {
    let lower = candidate.to_ascii_lowercase();
    !candidate.is_empty()
        && !TEMPORAL.contains(&lower.as_str())
        && !BARE_TEMPORAL.contains(&lower.as_str())
        && !is_detail_phrase(&lower)
}

/// Strip punctuation, courtesy words, time phrases and dangling
/// prepositions from the end until nothing changes.
fn strip_trailing(text: &str) -> &str {
    let mut current = text.trim();
    loop {
        let before = current;
        current = current
            .trim_end_matches(|c: char| c.is_ascii_punctuation())
            .trim_end();
        for phrase in COURTESY
            .iter()
            .chain(TEMPORAL.iter())
            .chain(PREPOSITIONS.iter())
        {
            if let Some(stripped) = strip_suffix_word(current, phrase) {
                current = stripped.trim_end();
                break;
            }
        }
        if current == before {
            return current;
        }
    }
}

/// Remove `phrase` from the end of `text` when it is a whole word there.
/// Case-insensitive; the phrase lists are ASCII.
fn strip_suffix_word<'a>(text: &'a str, phrase: &str) -> Option<&'a str> {
    if text.len() < phrase.len() {
        return None;
    }
    let cut = text.len() - phrase.len();
    if !text.is_char_boundary(cut) || !text[cut..].eq_ignore_ascii_case(phrase) {
        return None;
    }
    let head = &text[..cut];
    match head.chars().next_back() {
        None => Some(head),
        Some(c) if c.is_whitespace() || c == ',' => Some(head),
        Some(_) => None,
    }
}

fn words_with_offsets(text: &str) -> Vec<(usize, &str)> {
    let mut words = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                words.push((s, &text[s..i]));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        words.push((s, &text[s..]));
    }
    words
}
