//! Best-effort lookups.
//!
//! A failing store must never abort a turn. [`BestEffort::search`] turns
//! every error into an empty result and reports the outcome to the turn's
//! observer instead.

use std::time::Instant;

use dl_domain::trace::{TraceEvent, TurnObserver};

use crate::provider::{Document, SimilaritySearch};

pub struct BestEffort<'a> {
    trace_id: &'a str,
    observer: &'a dyn TurnObserver,
}

impl<'a> BestEffort<'a> {
    pub fn new(trace_id: &'a str, observer: &'a dyn TurnObserver) -> Self {
        Self { trace_id, observer }
    }

    /// Query `store` for the top `k` hits. Never fails: errors are recorded
    /// as [`TraceEvent::LookupFailed`] and yield an empty vec.
    pub async fn search(
        &self,
        lookup: &str,
        store: &dyn SimilaritySearch,
        query: &str,
        k: usize,
    ) -> Vec<Document> {
        if k == 0 {
            return Vec::new();
        }
        let start = Instant::now();
        match store.search(query, k).await {
            Ok(docs) => {
                self.observer.record(&TraceEvent::LookupCompleted {
                    trace_id: self.trace_id.to_owned(),
                    lookup: lookup.to_owned(),
                    results: docs.len(),
                    duration_ms: start.elapsed().as_millis() as u64,
                });
                docs
            }
            Err(e) => {
                tracing::warn!(
                    lookup = %lookup,
                    store = %store.name(),
                    error = %e,
                    "lookup failed; continuing without it"
                );
                self.observer.record(&TraceEvent::LookupFailed {
                    trace_id: self.trace_id.to_owned(),
                    lookup: lookup.to_owned(),
                    error: e.to_string(),
                });
                Vec::new()
            }
        }
    }

    /// Like [`search`](Self::search) for stores that may not be configured.
    pub async fn search_optional(
        &self,
        lookup: &str,
        store: Option<&dyn SimilaritySearch>,
        query: &str,
        k: usize,
    ) -> Vec<Document> {
        match store {
            Some(store) => self.search(lookup, store, query, k).await,
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dl_domain::error::{Error, Result};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<TraceEvent>>);

    impl TurnObserver for Recorder {
        fn record(&self, event: &TraceEvent) {
            self.0.lock().push(event.clone());
        }
    }

    struct Down;

    #[async_trait]
    impl SimilaritySearch for Down {
        fn name(&self) -> &str {
            "persona_memory"
        }
        async fn search(&self, _query: &str, _k: usize) -> Result<Vec<Document>> {
            Err(Error::Timeout("qdrant".into()))
        }
    }

    struct Fixed(Vec<Document>);

    #[async_trait]
    impl SimilaritySearch for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }
        async fn search(&self, _query: &str, k: usize) -> Result<Vec<Document>> {
            Ok(self.0.iter().take(k).cloned().collect())
        }
    }

    #[tokio::test]
    async fn failure_is_empty_and_recorded() {
        let recorder = Recorder::default();
        let docs = BestEffort::new("t-1", &recorder)
            .search("persona", &Down, "hello", 4)
            .await;
        assert!(docs.is_empty());

        let events = recorder.0.lock();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            TraceEvent::LookupFailed { lookup, trace_id, .. } if lookup == "persona" && trace_id == "t-1"
        ));
    }

    #[tokio::test]
    async fn success_reports_result_count() {
        let recorder = Recorder::default();
        let store = Fixed(vec![Document::new("a"), Document::new("b"), Document::new("c")]);
        let docs = BestEffort::new("t-2", &recorder)
            .search("memory", &store, "q", 2)
            .await;
        assert_eq!(docs.len(), 2);
        assert!(matches!(
            &recorder.0.lock()[0],
            TraceEvent::LookupCompleted { results: 2, .. }
        ));
    }

    #[tokio::test]
    async fn missing_store_is_silent() {
        let recorder = Recorder::default();
        let docs = BestEffort::new("t-3", &recorder)
            .search_optional("router_hints", None, "q", 3)
            .await;
        assert!(docs.is_empty());
        assert!(recorder.0.lock().is_empty());
    }
}
