use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Similarity stores (Qdrant + Ollama embeddings)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    #[serde(default = "d_qdrant_url")]
    pub qdrant_url: String,
    #[serde(default)]
    pub qdrant_api_key: Option<String>,
    /// Ollama base URL used for query embeddings.
    #[serde(default = "d_embed_url")]
    pub embed_url: String,
    #[serde(default = "d_embed_model")]
    pub embed_model: String,
    #[serde(default = "d_5000")]
    pub timeout_ms: u64,
    /// Long-term semantic memory. Always queried.
    #[serde(default = "d_knowledge")]
    pub knowledge_collection: String,
    /// Router hints. Empty string disables the lookup.
    #[serde(default = "d_router_hints")]
    pub router_hints_collection: String,
    /// Persona exemplars. Empty string disables the lookup.
    #[serde(default = "d_persona")]
    pub persona_collection: String,
    /// Conversation memory. Empty string disables the lookup.
    #[serde(default = "d_conversation")]
    pub conversation_collection: String,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            qdrant_url: d_qdrant_url(),
            qdrant_api_key: None,
            embed_url: d_embed_url(),
            embed_model: d_embed_model(),
            timeout_ms: 5000,
            knowledge_collection: d_knowledge(),
            router_hints_collection: d_router_hints(),
            persona_collection: d_persona(),
            conversation_collection: d_conversation(),
        }
    }
}

impl MemoryConfig {
    /// `Some(name)` when an optional collection is configured.
    pub fn optional_collection(name: &str) -> Option<&str> {
        let name = name.trim();
        (!name.is_empty()).then_some(name)
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_qdrant_url() -> String {
    "http://localhost:6333".into()
}
fn d_embed_url() -> String {
    "http://localhost:11434".into()
}
fn d_embed_model() -> String {
    "nomic-embed-text".into()
}
fn d_5000() -> u64 {
    5000
}
fn d_knowledge() -> String {
    "delilah_knowledge".into()
}
fn d_router_hints() -> String {
    "router_hints".into()
}
fn d_persona() -> String {
    "persona_memory".into()
}
fn d_conversation() -> String {
    "conversation_memory".into()
}
