use serde::Serialize;

use dl_domain::tool::ToolResult;
use dl_domain::turn::{Expert, Mood, ToolName};

use super::TurnOutcome;

/// The caller-facing view of a finished turn (`POST /v1/chat`, `ask --json`).
#[derive(Debug, Clone, Serialize)]
pub struct TurnSummary {
    pub answer: String,
    pub mood: Mood,
    pub target_expert: Expert,
    pub tool: Option<ToolName>,
    pub tool_result: Option<ToolResult>,
    pub tool_error: Option<String>,
    pub used_context: bool,
    pub num_docs: usize,
    pub used_conversation_context: bool,
    pub trace_id: String,
}

impl From<&TurnOutcome> for TurnSummary {
    fn from(outcome: &TurnOutcome) -> Self {
        let state = &outcome.state;
        Self {
            answer: outcome.answer().to_owned(),
            mood: state.mood,
            target_expert: state.target_expert,
            tool: state.tool,
            tool_result: state.tool_result.clone(),
            tool_error: state.tool_error.clone(),
            used_context: state.used_context,
            num_docs: state.num_docs,
            used_conversation_context: state.used_conversation_context,
            trace_id: state.trace_id().to_owned(),
        }
    }
}
