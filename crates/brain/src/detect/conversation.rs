//! Gate for the conversation-memory lookup.
//!
//! Prior turns are only retrieved when the utterance refers back to them
//! or states a lasting preference.

use std::sync::OnceLock;

use regex::RegexSet;

const PATTERNS: &[&str] = &[
    r"\bremember\b",
    r"\byou said\b",
    r"\blast time\b",
    r"\bearlier\b",
    r"\bprevious(ly)?\b",
    r"\bwe talked\b",
    r"\bwhat did i say\b",
    r"\bmy favorite\b",
    r"\bmy preference\b",
    r"\bfrom now on\b",
    r"\bgoing forward\b",
    r"\bdon't forget\b",
];

const PREFERENCE_WORDS: &[&str] = &["favorite", "prefer", "like", "hate"];

/// Short utterances mentioning a preference also count.
const SHORT_UTTERANCE_CHARS: usize = 18;

fn patterns() -> Option<&'static RegexSet> {
    static SET: OnceLock<Option<RegexSet>> = OnceLock::new();
    SET.get_or_init(|| match RegexSet::new(PATTERNS) {
        Ok(set) => Some(set),
        Err(e) => {
            tracing::error!(error = %e, "conversation patterns failed to compile");
            None
        }
    })
    .as_ref()
}

/// True if the lower-cased utterance should pull in prior conversation.
pub fn wants_conversation_memory(lower: &str) -> bool {
    if patterns().is_some_and(|set| set.is_match(lower)) {
        return true;
    }
    lower.chars().count() <= SHORT_UTTERANCE_CHARS
        && PREFERENCE_WORDS.iter().any(|w| lower.contains(w))
}
