use dl_domain::turn::ToolName;

use super::contains_any;

const WEATHER: &[&str] = &[
    "weather",
    "forecast",
    "temperature",
    "rain",
    "raining",
    "snow",
    "snowing",
    "sunny",
    "cloudy",
    "windy",
    "humid",
    "humidity",
    "umbrella",
    "storm",
    "storms",
    "thunderstorm",
    "hot outside",
    "cold outside",
];

const SPORTS: &[&str] = &[
    "game",
    "games",
    "score",
    "scores",
    "play next",
    "playing tonight",
    "playing today",
    "matchup",
    "nfl",
    "nba",
    "mlb",
    "nhl",
    "mls",
    "football",
    "basketball",
    "baseball",
    "hockey",
    "soccer",
    "playoffs",
    "standings",
    "kickoff",
];

pub fn is_weather_query(lower: &str) -> bool {
    contains_any(lower, WEATHER)
}

pub fn is_sports_query(lower: &str) -> bool {
    contains_any(lower, SPORTS)
}

/// Pick the real-time tool for the lower-cased utterance, if any.
/// Weather is checked first; sports is never evaluated when it matches.
pub fn detect_tool(lower: &str) -> Option<ToolName> {
    if is_weather_query(lower) {
        Some(ToolName::Weather)
    } else if is_sports_query(lower) {
        Some(ToolName::Sports)
    } else {
        None
    }
}
