//! Chat assistant endpoint.

use axum::{extract::State, Json};
use serde::Deserialize;

use super::{respond, ApiResult};
use crate::widget::ChatReply;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// POST /api/chat - Ask the assistant.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<ChatReply> {
    let result = state.widget.chat(&request.message).await;
    respond(&state.widget, result).await
}
