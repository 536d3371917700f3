//! `POST /v1/chat`: run one turn and return its summary.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde::Deserialize;

use dl_domain::error::Error;

use crate::pipeline::TurnSummary;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// User utterance.
    pub message: String,
    /// Falls back to `pipeline.default_user_id`.
    #[serde(default)]
    pub user_id: Option<String>,
}

pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> impl IntoResponse {
    match state
        .brain
        .run_turn(&body.message, body.user_id.as_deref())
        .await
    {
        Ok(outcome) => Json(TurnSummary::from(&outcome)).into_response(),
        Err(Error::EmptyUtterance) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "message must not be empty" })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "turn failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
