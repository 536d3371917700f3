use serde::{Deserialize, Serialize};

use crate::turn::DetailLevel;

/// Normalized result of one tool invocation.
///
/// Serializes flat, so callers see either `{"ok": true, ...payload}` or
/// `{"ok": false, "error": "...", ...partial payload}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub payload: ToolPayload,
}

/// Tool-specific body of a [`ToolResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolPayload {
    Weather(WeatherReport),
    Sports(SportsReport),
    /// No payload (e.g. the dispatcher caught a failure before the tool produced one).
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub summary: String,
    pub detail_level: DetailLevel,
    /// The location as extracted from the utterance (`None` = home location).
    pub location_name: Option<String>,
    /// Human-readable label for the resolved location.
    pub location_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SportsReport {
    pub summary: String,
    pub team_query: String,
    pub team: Option<serde_json::Value>,
    pub next_event: Option<serde_json::Value>,
    pub last_event: Option<serde_json::Value>,
}

// ── Convenience constructors ───────────────────────────────────────

impl ToolResult {
    pub fn success(payload: ToolPayload) -> Self {
        Self {
            ok: true,
            error: None,
            payload,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self::failed_with(error, ToolPayload::Empty)
    }

    pub fn failed_with(error: impl Into<String>, payload: ToolPayload) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
            payload,
        }
    }

    /// The user-facing summary carried by the payload, if any.
    pub fn summary(&self) -> Option<&str> {
        match &self.payload {
            ToolPayload::Weather(w) if !w.summary.is_empty() => Some(w.summary.as_str()),
            ToolPayload::Sports(s) if !s.summary.is_empty() => Some(s.summary.as_str()),
            _ => None,
        }
    }
}
