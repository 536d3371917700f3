//! The first three pipeline stages.
//!
//! Each stage consumes the turn state and returns the next one. Mood and
//! tool-intent detection are pure; tool execution is the only stage here
//! that performs I/O.

use std::time::Instant;

use dl_domain::trace::{TraceEvent, TurnObserver};
use dl_domain::turn::{ToolArgs, ToolName, TurnState};
use dl_tools::ToolDispatcher;

use crate::detect;

// ── Stage 1: mood ────────────────────────────────────────────────────

pub fn detect_mood(state: TurnState) -> TurnState {
    let mood = detect::detect_mood(&state.lower());
    state.with_mood(mood)
}

// ── Stage 2: tool intent ─────────────────────────────────────────────

/// Decide the tool and its arguments. Performs no I/O.
pub fn detect_tool_intent(state: TurnState) -> TurnState {
    let lower = state.lower();
    match detect::detect_tool(&lower) {
        Some(ToolName::Weather) => {
            let detail = detect::detect_detail_level(&lower);
            let location = detect::extract_location(state.text());
            state.with_tool(ToolName::Weather, ToolArgs::weather(location, detail))
        }
        Some(ToolName::Sports) => {
            let team = detect::extract_team(&lower);
            state.with_tool(ToolName::Sports, ToolArgs::sports(team))
        }
        None => state,
    }
}

// ── Stage 3: tool execution ──────────────────────────────────────────

/// Run the selected tool, if any. Never fails: the dispatcher normalizes
/// every outcome into a `ToolResult`.
pub async fn execute_tool(
    state: TurnState,
    dispatcher: &ToolDispatcher,
    observer: &dyn TurnObserver,
) -> TurnState {
    let Some(tool) = state.tool else {
        return state;
    };

    let started = Instant::now();
    let result = dispatcher.dispatch(tool, &state.tool_args, state.text()).await;
    observer.record(&TraceEvent::ToolExecuted {
        trace_id: state.trace_id().to_owned(),
        tool: tool.to_string(),
        ok: result.ok,
        duration_ms: started.elapsed().as_millis() as u64,
        error: result.error.clone(),
    });
    state.with_tool_result(result)
}
