//! Team-name extraction for sports questions.

/// Leading question phrases, longest first.
const LEADING: &[&str] = &[
    "what's the score of the",
    "what is the score of the",
    "what time do the",
    "what time does the",
    "when is the next game for the",
    "when's the next game for the",
    "next game for the",
    "when do the",
    "when does the",
    "when are the",
    "when is the",
    "when's the",
    "how did the",
    "did the",
    "who do the",
    "who are the",
    "are the",
    "what time do",
    "what time does",
    "when do",
    "when does",
    "when is",
    "how did",
    "did",
    "the",
];

/// Trailing phrases, longest first.
const TRAILING: &[&str] = &[
    "play next",
    "playing next",
    "play tonight",
    "playing tonight",
    "play today",
    "playing today",
    "next game",
    "last night",
    "schedule",
    "playing",
    "play",
    "game",
    "score",
    "win",
    "lose",
    "tonight",
    "today",
    "next",
];

/// Strip question scaffolding from the lower-cased utterance, repeating
/// until stable, and return what is left as the team phrase.
pub fn extract_team(lower: &str) -> String {
    let mut current = tidy(lower);
    loop {
        let before = current;
        if let Some(rest) = LEADING
            .iter()
            .find_map(|p| strip_prefix_word(current, p))
        {
            current = tidy(rest);
        }
        if let Some(rest) = TRAILING
            .iter()
            .find_map(|p| strip_suffix_word(current, p))
        {
            current = tidy(rest);
        }
        if current == before {
            return current.to_string();
        }
    }
}

fn tidy(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || (c.is_ascii_punctuation() && c != '\''))
}

fn strip_prefix_word<'a>(text: &'a str, phrase: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(phrase)?;
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if !c.is_alphanumeric() => Some(rest),
        Some(_) => None,
    }
}

fn strip_suffix_word<'a>(text: &'a str, phrase: &str) -> Option<&'a str> {
    let head = text.strip_suffix(phrase)?;
    match head.chars().next_back() {
        None => Some(head),
        Some(c) if !c.is_alphanumeric() => Some(head),
        Some(_) => None,
    }
}
