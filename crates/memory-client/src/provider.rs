//! Similarity-search and embedding seams.
//!
//! Every store the context assembler reads (router hints, persona
//! exemplars, long-term memory, conversation memory) is a
//! [`SimilaritySearch`]. Implementations may talk to Qdrant or be a test
//! double.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use dl_domain::error::Result;

/// One similarity hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: Map::new(),
        }
    }

    /// Builder-style metadata insert, mostly for tests and seeding.
    pub fn with_meta(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_owned(), value.into());
        self
    }

    /// String metadata value, if present and non-empty.
    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[async_trait]
pub trait SimilaritySearch: Send + Sync {
    /// Store name for logs and trace events (usually the collection).
    fn name(&self) -> &str;

    /// Top-`k` documents for `query`, best first.
    async fn search(&self, query: &str, k: usize) -> Result<Vec<Document>>;
}

#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}
