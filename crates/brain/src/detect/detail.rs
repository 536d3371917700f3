use dl_domain::turn::DetailLevel;

use super::contains_any;

const FULL: &[&str] = &[
    "full forecast",
    "full report",
    "extended forecast",
    "7 day",
    "7-day",
    "seven day",
    "this week",
    "whole week",
    "all week",
    "rest of the week",
    "next week",
    "weekly",
];

const DETAILED: &[&str] = &[
    "detailed",
    "detail",
    "details",
    "in depth",
    "more info",
    "breakdown",
    "tomorrow",
    "next few days",
    "weekend",
];

/// Forecast detail level for the lower-cased utterance. Total: every input
/// maps to exactly one level, `short` by default.
pub fn detect_detail_level(lower: &str) -> DetailLevel {
    if contains_any(lower, FULL) {
        DetailLevel::Full
    } else if contains_any(lower, DETAILED) {
        DetailLevel::Medium
    } else {
        DetailLevel::Short
    }
}

/// Bare detail words that must never be taken for a place name.
pub(crate) fn is_detail_phrase(lower: &str) -> bool {
    let lower = lower.trim();
    FULL.contains(&lower) || DETAILED.contains(&lower) || lower == "depth"
}
