use serde::Serialize;

/// Structured trace events emitted across all Delilah crates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    TurnStarted {
        trace_id: String,
        user_id: String,
        text_chars: usize,
    },
    MoodDetected {
        trace_id: String,
        mood: String,
    },
    ToolSelected {
        trace_id: String,
        tool: String,
        args: serde_json::Value,
    },
    ToolExecuted {
        trace_id: String,
        tool: String,
        ok: bool,
        duration_ms: u64,
        error: Option<String>,
    },
    LookupCompleted {
        trace_id: String,
        lookup: String,
        results: usize,
        duration_ms: u64,
    },
    LookupFailed {
        trace_id: String,
        lookup: String,
        error: String,
    },
    ExpertOverride {
        trace_id: String,
        from: String,
        to: String,
    },
    ExpertHintRejected {
        trace_id: String,
        proposed: String,
        reason: String,
    },
    MoodOverride {
        trace_id: String,
        from: String,
        to: String,
    },
    PromptBuilt {
        trace_id: String,
        prompt_chars: usize,
        persona_chars: usize,
        memory_chars: usize,
        conversation_chars: usize,
    },
    GenerationCompleted {
        trace_id: String,
        provider: String,
        duration_ms: u64,
        answer_chars: usize,
    },
    GenerationFailed {
        trace_id: String,
        provider: String,
        error: String,
    },
    HttpCall {
        endpoint: String,
        status: u16,
        duration_ms: u64,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "dl_event");
    }
}

/// Receives every [`TraceEvent`] a turn produces.
///
/// The pipeline never logs lookup or tool failures directly; it hands them
/// to the observer it was built with so tests can assert on them.
pub trait TurnObserver: Send + Sync {
    fn record(&self, event: &TraceEvent);
}

/// Production observer: forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TurnObserver for TracingObserver {
    fn record(&self, event: &TraceEvent) {
        event.emit();
    }
}
