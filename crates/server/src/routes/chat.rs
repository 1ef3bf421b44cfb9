//! FAQ chatbot endpoints

use crate::api::{ApiError, AppState};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use server_lib::chatbot::{MatchKind, WELCOME_MESSAGE};
use server_lib::error::BackendError;
use server_lib::models::{ChatReply, ChatRequest};

/// GET / - chatbot greeting
pub async fn home() -> Json<serde_json::Value> {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

/// POST /chat - answer a user query from the FAQ dataset
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    state.metrics.inc_chat_requests();

    let engine = state.chat.clone().ok_or(BackendError::ChatUnavailable)?;

    // Embedding inference is CPU-bound and synchronous.
    let outcome = tokio::task::spawn_blocking(move || engine.reply(&request.query))
        .await
        .map_err(|e| BackendError::Embedding(format!("Chat task failed: {e}")))??;

    if outcome.kind == MatchKind::Fallback {
        state.metrics.inc_chat_fallbacks();
    }
    state.logger.log_chat(outcome.kind.as_str());

    Ok(Json(ChatReply {
        response: outcome.response,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/chat", post(chat))
}
