pub mod chat;
pub mod health;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the API router with state and request tracing attached.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/deps", get(health::dependencies))
        .route("/v1/chat", post(chat::chat))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
