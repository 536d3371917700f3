use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Turn pipeline
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Knobs for the context assembler and prompt builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Name the assistant is introduced as in the instruction block.
    #[serde(default = "d_assistant")]
    pub assistant_name: String,
    /// Used when a caller does not supply a user id.
    #[serde(default = "d_user")]
    pub default_user_id: String,
    /// Top-k for the long-term semantic memory lookup.
    #[serde(default = "d_3")]
    pub memory_k: usize,
    /// Top-k for the persona exemplar lookup.
    #[serde(default = "d_4")]
    pub persona_k: usize,
    /// Top-k for the router hint lookup.
    #[serde(default = "d_3")]
    pub router_k: usize,
    /// Top-k for the conversation memory lookup.
    #[serde(default = "d_6")]
    pub conversation_k: usize,
    #[serde(default = "d_2500")]
    pub memory_max_chars: usize,
    #[serde(default = "d_1200")]
    pub persona_max_chars: usize,
    #[serde(default = "d_2500")]
    pub conversation_max_chars: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            assistant_name: d_assistant(),
            default_user_id: d_user(),
            memory_k: 3,
            persona_k: 4,
            router_k: 3,
            conversation_k: 6,
            memory_max_chars: 2500,
            persona_max_chars: 1200,
            conversation_max_chars: 2500,
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_assistant() -> String {
    "Delilah".into()
}
fn d_user() -> String {
    "default_user".into()
}
fn d_3() -> usize {
    3
}
fn d_4() -> usize {
    4
}
fn d_6() -> usize {
    6
}
fn d_1200() -> usize {
    1200
}
fn d_2500() -> usize {
    2500
}
