//! Qdrant REST adapter.
//!
//! [`QdrantClient`] owns the HTTP connection pool and is shared by every
//! collection; [`QdrantStore`] binds one collection to an [`Embedder`] and
//! implements [`SimilaritySearch`]. Payloads follow the LangChain layout
//! the seed scripts write: `page_content` + `metadata` (older points use
//! `text`).

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use dl_domain::config::MemoryConfig;
use dl_domain::error::{Error, Result};
use dl_domain::trace::TraceEvent;

use crate::provider::{Document, Embedder, SimilaritySearch};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Client
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone)]
pub struct QdrantClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    vector: &'a [f32],
    limit: usize,
    with_payload: bool,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<ScoredPoint>,
}

#[derive(Deserialize)]
struct ScoredPoint {
    #[serde(default)]
    payload: Option<Map<String, Value>>,
}

impl QdrantClient {
    pub fn new(cfg: &MemoryConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(Self {
            http,
            base_url: cfg.qdrant_url.trim_end_matches('/').to_owned(),
            api_key: cfg.qdrant_api_key.clone(),
        })
    }

    fn decorate(&self, rb: RequestBuilder) -> RequestBuilder {
        match self.api_key {
            Some(ref key) => rb.header("api-key", key),
            None => rb,
        }
    }

    /// Single attempt; non-2xx is an error.
    async fn send(&self, endpoint: &str, rb: RequestBuilder) -> Result<reqwest::Response> {
        let start = Instant::now();
        let resp = self.decorate(rb).send().await.map_err(from_reqwest)?;
        let status = resp.status().as_u16();

        TraceEvent::HttpCall {
            endpoint: endpoint.to_owned(),
            status,
            duration_ms: start.elapsed().as_millis() as u64,
        }
        .emit();

        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Memory {
                store: "qdrant".into(),
                message: format!("{endpoint} returned {status}: {body}"),
            });
        }
        Ok(resp)
    }

    /// `POST /collections/{name}/points/search`.
    pub async fn search_points(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<Document>> {
        let url = format!("{}/collections/{collection}/points/search", self.base_url);
        let rb = self.http.post(&url).json(&SearchRequest {
            vector,
            limit,
            with_payload: true,
        });
        let resp = self
            .send(&format!("POST /collections/{collection}/points/search"), rb)
            .await?;

        let body: SearchResponse = resp.json().await.map_err(from_reqwest)?;
        Ok(body
            .result
            .into_iter()
            .filter_map(|p| p.payload.and_then(document_from_payload))
            .collect())
    }

    /// `GET /collections`: names of existing collections (dependency probe).
    pub async fn list_collections(&self) -> Result<Vec<String>> {
        let url = format!("{}/collections", self.base_url);
        let resp = self.send("GET /collections", self.http.get(&url)).await?;
        let body: Value = resp.json().await.map_err(from_reqwest)?;
        Ok(body
            .pointer("/result/collections")
            .and_then(Value::as_array)
            .map(|cols| {
                cols.iter()
                    .filter_map(|c| c.get("name").and_then(Value::as_str))
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Decode one point payload. Points with no text are dropped.
pub fn document_from_payload(mut payload: Map<String, Value>) -> Option<Document> {
    let content = payload
        .remove("page_content")
        .or_else(|| payload.remove("text"))
        .and_then(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        })?;
    if content.trim().is_empty() {
        return None;
    }
    let metadata = match payload.remove("metadata") {
        Some(Value::Object(m)) => m,
        // Flat payloads keep their remaining keys as metadata.
        _ => payload,
    };
    Some(Document { content, metadata })
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Store
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct QdrantStore {
    client: Arc<QdrantClient>,
    embedder: Arc<dyn Embedder>,
    collection: String,
}

impl QdrantStore {
    pub fn new(
        client: Arc<QdrantClient>,
        embedder: Arc<dyn Embedder>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            client,
            embedder,
            collection: collection.into(),
        }
    }
}

#[async_trait]
impl SimilaritySearch for QdrantStore {
    fn name(&self) -> &str {
        &self.collection
    }

    async fn search(&self, query: &str, k: usize) -> Result<Vec<Document>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let vector = self.embedder.embed(query).await?;
        self.client
            .search_points(&self.collection, &vector, k)
            .await
    }
}

/// Convert a [`reqwest::Error`] into the domain [`Error`] type.
///
/// Timeout errors map to [`Error::Timeout`]; everything else maps to
/// [`Error::Http`].
pub fn from_reqwest(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(e.to_string())
    } else {
        Error::Http(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn langchain_payload_decodes() {
        let doc = document_from_payload(obj(json!({
            "page_content": "Prefers short answers in the morning.",
            "metadata": {"mood": "focused_direct", "user_id": "ryan"}
        })))
        .unwrap();
        assert_eq!(doc.content, "Prefers short answers in the morning.");
        assert_eq!(doc.meta_str("mood"), Some("focused_direct"));
    }

    #[test]
    fn flat_text_payload_keeps_other_keys_as_metadata() {
        let doc = document_from_payload(obj(json!({
            "text": "Home Assistant runs on the NUC.",
            "target_expert": "home_automation"
        })))
        .unwrap();
        assert_eq!(doc.meta_str("target_expert"), Some("home_automation"));
    }

    #[test]
    fn blank_payload_is_dropped() {
        assert!(document_from_payload(obj(json!({"page_content": "  "}))).is_none());
        assert!(document_from_payload(obj(json!({"metadata": {}}))).is_none());
    }

    #[test]
    fn search_response_tolerates_missing_payloads() {
        let body: SearchResponse = serde_json::from_value(json!({
            "result": [
                {"id": 1, "score": 0.9, "payload": {"page_content": "a"}},
                {"id": 2, "score": 0.8}
            ],
            "status": "ok"
        }))
        .unwrap();
        let docs: Vec<_> = body
            .result
            .into_iter()
            .filter_map(|p| p.payload.and_then(document_from_payload))
            .collect();
        assert_eq!(docs.len(), 1);
    }
}
