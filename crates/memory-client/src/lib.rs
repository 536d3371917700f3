//! `dl-memory`: similarity-search stores for the Delilah brain.
//!
//! Provides the [`SimilaritySearch`] trait the context assembler reads
//! through, a Qdrant REST implementation ([`QdrantStore`]) that embeds
//! queries with Ollama ([`OllamaEmbedder`]), and the [`BestEffort`]
//! wrapper that turns lookup failures into empty results.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use dl_domain::config::MemoryConfig;
//! use dl_memory::{create_stores, SimilaritySearch};
//!
//! # async fn example() -> dl_domain::error::Result<()> {
//! let stores = create_stores(&MemoryConfig::default())?;
//! let docs = stores.knowledge.search("where does the NUC live", 3).await?;
//! println!("found {} documents", docs.len());
//! # Ok(())
//! # }
//! ```

pub mod best_effort;
pub mod embed;
pub mod provider;
pub mod qdrant;

// ── Re-exports for ergonomic imports ─────────────────────────────────

pub use best_effort::BestEffort;
pub use embed::OllamaEmbedder;
pub use provider::{Document, Embedder, SimilaritySearch};
pub use qdrant::{from_reqwest, QdrantClient, QdrantStore};

use std::sync::Arc;

use dl_domain::config::MemoryConfig;
use dl_domain::error::Result;

/// The four stores a turn may read. Only `knowledge` is mandatory.
#[derive(Clone)]
pub struct MemoryStores {
    pub knowledge: Arc<dyn SimilaritySearch>,
    pub router_hints: Option<Arc<dyn SimilaritySearch>>,
    pub persona: Option<Arc<dyn SimilaritySearch>>,
    pub conversation: Option<Arc<dyn SimilaritySearch>>,
    /// Shared client, kept for dependency probes.
    pub qdrant: Option<Arc<QdrantClient>>,
}

impl MemoryStores {
    /// Stores with only the mandatory long-term memory (tests, offline use).
    pub fn knowledge_only(knowledge: Arc<dyn SimilaritySearch>) -> Self {
        Self {
            knowledge,
            router_hints: None,
            persona: None,
            conversation: None,
            qdrant: None,
        }
    }
}

/// Build Qdrant-backed stores for every configured collection.
///
/// Optional collections set to an empty string are left as `None`.
pub fn create_stores(cfg: &MemoryConfig) -> Result<MemoryStores> {
    let client = Arc::new(QdrantClient::new(cfg)?);
    let embedder: Arc<dyn Embedder> = Arc::new(OllamaEmbedder::new(cfg)?);

    let store = |name: &str| -> Arc<dyn SimilaritySearch> {
        Arc::new(QdrantStore::new(client.clone(), embedder.clone(), name))
    };
    let optional = |name: &str| MemoryConfig::optional_collection(name).map(store);

    let stores = MemoryStores {
        knowledge: store(&cfg.knowledge_collection),
        router_hints: optional(&cfg.router_hints_collection),
        persona: optional(&cfg.persona_collection),
        conversation: optional(&cfg.conversation_collection),
        qdrant: Some(client.clone()),
    };

    tracing::info!(
        qdrant = %cfg.qdrant_url,
        embed_model = %cfg.embed_model,
        knowledge = %cfg.knowledge_collection,
        router_hints = stores.router_hints.is_some(),
        persona = stores.persona.is_some(),
        conversation = stores.conversation.is_some(),
        "memory stores ready"
    );
    Ok(stores)
}
