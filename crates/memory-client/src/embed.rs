//! Ollama embeddings (`POST /api/embeddings`).

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use dl_domain::config::MemoryConfig;
use dl_domain::error::{Error, Result};
use dl_domain::trace::TraceEvent;

use crate::provider::Embedder;
use crate::qdrant::from_reqwest;

#[derive(Debug, Clone)]
pub struct OllamaEmbedder {
    http: Client,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    #[serde(default)]
    embedding: Vec<f32>,
}

impl OllamaEmbedder {
    pub fn new(cfg: &MemoryConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(Self {
            http,
            base_url: cfg.embed_url.trim_end_matches('/').to_owned(),
            model: cfg.embed_model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.base_url);
        let start = Instant::now();
        let resp = self
            .http
            .post(&url)
            .json(&EmbeddingsRequest {
                model: &self.model,
                prompt: text,
            })
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = resp.status().as_u16();
        TraceEvent::HttpCall {
            endpoint: "POST /api/embeddings".into(),
            status,
            duration_ms: start.elapsed().as_millis() as u64,
        }
        .emit();

        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Provider {
                provider: "ollama-embed".into(),
                message: format!("{url} returned {status}: {body}"),
            });
        }

        let body: EmbeddingsResponse = resp.json().await.map_err(from_reqwest)?;
        if body.embedding.is_empty() {
            return Err(Error::Provider {
                provider: "ollama-embed".into(),
                message: format!("empty embedding from model {}", self.model),
            });
        }
        Ok(body.embedding)
    }
}
