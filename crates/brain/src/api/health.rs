//! Liveness and dependency probes.

use axum::extract::State;
use axum::response::{IntoResponse, Json};

use crate::state::AppState;

/// `GET /health`: process is up; echoes what it was wired with.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let brain = &state.brain;
    let stores = brain.stores();
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "assistant": brain.config().assistant_name,
        "generator": brain.generator_id(),
        "tools": brain.dispatcher().names(),
        "collections": {
            "knowledge": stores.knowledge.name(),
            "router_hints": stores.router_hints.as_ref().map(|s| s.name().to_owned()),
            "persona": stores.persona.as_ref().map(|s| s.name().to_owned()),
            "conversation": stores.conversation.as_ref().map(|s| s.name().to_owned()),
        },
        "started_at": state.started_at.to_rfc3339(),
    }))
}

/// `GET /health/deps`: probe Qdrant once and report which configured
/// collections exist. Never fails; a down dependency is reported in the body.
pub async fn dependencies(State(state): State<AppState>) -> impl IntoResponse {
    let stores = state.brain.stores();
    let Some(client) = stores.qdrant.as_ref() else {
        return Json(serde_json::json!({
            "qdrant": { "ok": false, "error": "not configured" },
        }));
    };

    match client.list_collections().await {
        Ok(existing) => {
            let configured: Vec<String> = std::iter::once(&stores.knowledge)
                .chain(stores.router_hints.iter())
                .chain(stores.persona.iter())
                .chain(stores.conversation.iter())
                .map(|s| s.name().to_owned())
                .collect();
            let missing: Vec<&String> = configured
                .iter()
                .filter(|name| !existing.contains(*name))
                .collect();
            Json(serde_json::json!({
                "qdrant": {
                    "ok": missing.is_empty(),
                    "collections": existing,
                    "missing": missing,
                },
            }))
        }
        Err(e) => {
            tracing::warn!(error = %e, "qdrant probe failed");
            Json(serde_json::json!({
                "qdrant": { "ok": false, "error": e.to_string() },
            }))
        }
    }
}
