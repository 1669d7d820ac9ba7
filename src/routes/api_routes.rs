use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;

use crate::errors::AppError;
use crate::upstream::{Relayed, UpstreamClient};

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET `/api` — liveness check for the API surface
pub async fn api_index() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "AI Assistant API is running" }))
}

/// POST `/api/chat` — forwards the JSON body to the chat backend
pub async fn chat_handler(
    State(upstream): State<UpstreamClient>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Relayed, AppError> {
    let Json(body) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    if !body.is_object() {
        return Err(AppError::BadRequest(
            "chat request must be a JSON object".to_string(),
        ));
    }
    upstream.post_chat(&body).await
}

/// GET `/api/session/{id}/history` — conversation stored by the backend
pub async fn history_handler(
    Path(session_id): Path<String>,
    State(upstream): State<UpstreamClient>,
) -> Result<Relayed, AppError> {
    if session_id.trim().is_empty() {
        return Err(AppError::BadRequest("session id cannot be empty".to_string()));
    }
    upstream.get_history(&session_id).await
}

/// Anything else under `/api`
pub async fn api_not_found() -> AppError {
    AppError::NotFound
}
