//! Section formatting for the instruction block.

use serde_json::{Map, Value};

use dl_domain::tool::{ToolPayload, ToolResult};
use dl_domain::turn::ToolName;

pub const NO_PERSONA_PLACEHOLDER: &str = "(no persona override; use your default voice)";
pub const NO_CONVERSATION_PLACEHOLDER: &str = "(none yet)";
pub const NO_MEMORY_PLACEHOLDER: &str = "(no relevant memory)";
pub const NO_TOOL_PLACEHOLDER: &str = "(no real-time tool was used for this turn)";

/// Format one titled section with machine-inspectable delimiters.
pub fn format_section(title: &str, body: &str) -> String {
    format!(
        "\
=== {title} ===
{body}
"
    )
}

/// `body`, or `placeholder` when the body is blank.
pub fn or_placeholder<'a>(body: &'a str, placeholder: &'a str) -> &'a str {
    if body.trim().is_empty() {
        placeholder
    } else {
        body
    }
}

/// One persona exemplar as a bullet with its metadata inline:
/// `- Keep it short. [mood=focused_direct, tone=brief]`.
///
/// `user_id` is omitted; non-scalar values are skipped.
pub fn format_exemplar_line(content: &str, metadata: &Map<String, Value>) -> String {
    let content = content.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut tags: Vec<String> = metadata
        .iter()
        .filter(|(k, _)| k.as_str() != "user_id")
        .filter_map(|(k, v)| match v {
            Value::String(s) if !s.trim().is_empty() => Some(format!("{k}={}", s.trim())),
            Value::Number(n) => Some(format!("{k}={n}")),
            Value::Bool(b) => Some(format!("{k}={b}")),
            _ => None,
        })
        .collect();
    tags.sort();
    if tags.is_empty() {
        format!("- {content}")
    } else {
        format!("- {content} [{}]", tags.join(", "))
    }
}

/// The one-line tool summary for the instruction block.
pub fn format_tool_line(
    tool: Option<ToolName>,
    result: Option<&ToolResult>,
    error: Option<&str>,
) -> String {
    let Some(tool) = tool else {
        return NO_TOOL_PLACEHOLDER.to_string();
    };
    let Some(result) = result else {
        return format!("{tool}: no result was produced. Do not guess real-time data.");
    };

    match (&result.payload, result.ok) {
        (ToolPayload::Weather(w), true) => format!(
            "Weather for {} ({} forecast, from weather.gov): {}",
            w.location_label, w.detail_level, w.summary
        ),
        (ToolPayload::Weather(w), false) => format!(
            "Weather lookup for {} failed: {}. Tell the user live weather is unavailable right now; do not guess a forecast.",
            w.location_label,
            error.unwrap_or("unknown error")
        ),
        (ToolPayload::Sports(s), _) => {
            let team = if s.team_query.is_empty() {
                "the requested team"
            } else {
                s.team_query.as_str()
            };
            format!(
                "Sports lookup for {team}: {} Do not invent schedules, scores or results.",
                s.summary
            )
        }
        (ToolPayload::Empty, _) => format!(
            "{tool} tool returned no usable data ({}). Do not guess real-time data.",
            error.unwrap_or("no details")
        ),
    }
}
