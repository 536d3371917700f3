pub mod ollama;
pub mod openai_compat;
pub mod traits;
pub mod util;

// Re-exports for convenience.
pub use ollama::OllamaGenerator;
pub use openai_compat::OpenAiCompatGenerator;
pub use traits::Generator;

use std::sync::Arc;

use dl_domain::config::{LlmConfig, ProviderKind};
use dl_domain::error::Result;

/// Build the configured [`Generator`].
pub fn create_generator(cfg: &LlmConfig) -> Result<Arc<dyn Generator>> {
    let generator: Arc<dyn Generator> = match cfg.kind {
        ProviderKind::Ollama => Arc::new(OllamaGenerator::from_config(cfg)?),
        ProviderKind::OpenaiCompat => Arc::new(OpenAiCompatGenerator::from_config(cfg)?),
    };
    tracing::info!(
        provider = %generator.provider_id(),
        base_url = %cfg.base_url,
        "generator ready"
    );
    Ok(generator)
}
