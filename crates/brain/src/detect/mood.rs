use dl_domain::turn::Mood;

use super::contains_any;

const DISTRESS: &[&str] = &[
    "overwhelmed",
    "overwhelming",
    "stressed",
    "stressed out",
    "anxious",
    "anxiety",
    "panic",
    "panicking",
    "scared",
    "afraid",
    "depressed",
    "hopeless",
    "upset",
    "freaking out",
    "can't cope",
    "cannot cope",
    "burned out",
    "burnt out",
    "exhausted",
    "lonely",
    "crying",
    "worried",
    "falling apart",
    "rough day",
    "terrible day",
];

const URGENCY: &[&str] = &[
    "asap",
    "urgent",
    "urgently",
    "quick",
    "quickly",
    "hurry",
    "right away",
    "immediately",
    "in a rush",
    "no time",
    "just tell me",
    "short answer",
    "tl;dr",
];

const GRATITUDE: &[&str] = &[
    "thank you",
    "thanks",
    "thx",
    "appreciate it",
    "appreciate you",
    "you're the best",
    "you are the best",
    "great job",
    "well done",
    "nice work",
    "you rock",
    "that helped",
    "that was helpful",
];

const GREETINGS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "hiya",
    "howdy",
    "yo",
    "good morning",
    "good afternoon",
    "good evening",
    "greetings",
];

/// Greetings only count on short utterances.
const GREETING_MAX_WORDS: usize = 6;

/// Classify the lower-cased utterance. First match wins, in order:
/// distress, urgency, gratitude, short greeting.
pub fn detect_mood(lower: &str) -> Mood {
    if contains_any(lower, DISTRESS) {
        Mood::SupportiveCalm
    } else if contains_any(lower, URGENCY) {
        Mood::FocusedDirect
    } else if contains_any(lower, GRATITUDE) {
        Mood::AppreciatedSoft
    } else if lower.split_whitespace().count() <= GREETING_MAX_WORDS
        && contains_any(lower, GREETINGS)
    {
        Mood::CasualGreeting
    } else {
        Mood::Neutral
    }
}
