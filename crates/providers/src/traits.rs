use dl_domain::error::Result;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Generation trait
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `prompt → text`, one call per turn.
///
/// Implementations are thin adapters over a model server's HTTP API. They
/// do not retry; the turn pipeline decides what a failure means.
#[async_trait::async_trait]
pub trait Generator: Send + Sync {
    /// Complete the fully assembled prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Identifier used in logs and trace events (e.g. `ollama:llama3:8b`).
    fn provider_id(&self) -> &str;
}
