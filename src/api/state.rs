//! State, interest, tab, tips and content endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use super::{applied, respond, ApiResult};
use crate::models::ContentItem;
use crate::tips::LearningTip;
use crate::widget::Snapshot;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SelectInterestRequest {
    pub interest: String,
}

#[derive(Debug, Deserialize)]
pub struct SwitchTabRequest {
    pub tab: String,
}

/// GET /api/state - Widget snapshot.
pub async fn get_state(State(state): State<AppState>) -> ApiResult<Snapshot> {
    applied(state.widget.snapshot().await)
}

/// POST /api/interests - Select an interest.
pub async fn select_interest(
    State(state): State<AppState>,
    Json(request): Json<SelectInterestRequest>,
) -> ApiResult<Snapshot> {
    let result = state.widget.select_interest(&request.interest).await;
    respond(&state.widget, result).await
}

/// DELETE /api/interests/:interest - Deselect an interest.
pub async fn deselect_interest(
    State(state): State<AppState>,
    Path(interest): Path<String>,
) -> ApiResult<Snapshot> {
    applied(state.widget.deselect_interest(&interest).await)
}

/// PUT /api/tab - Switch the current tab.
pub async fn switch_tab(
    State(state): State<AppState>,
    Json(request): Json<SwitchTabRequest>,
) -> ApiResult<Snapshot> {
    let result = state.widget.switch_tab(&request.tab).await;
    respond(&state.widget, result).await
}

/// GET /api/tips - Learning path for the current selection.
pub async fn get_tips(State(state): State<AppState>) -> ApiResult<LearningTip> {
    applied(state.widget.tips().await)
}

/// GET /api/content - Built-in catalog, annotated and ranked.
pub async fn get_content(State(state): State<AppState>) -> ApiResult<Vec<ContentItem>> {
    applied(state.widget.content().await)
}
