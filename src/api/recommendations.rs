//! Recommendation and platform endpoints backed by the learning backend.

use axum::extract::State;

use super::{applied, respond, ApiResult};
use crate::models::Platform;
use crate::widget::{PlatformList, Recommendations};
use crate::AppState;

/// POST /api/recommendations - Refresh remote recommendations.
pub async fn refresh_recommendations(State(state): State<AppState>) -> ApiResult<Recommendations> {
    let result = state.widget.refresh_recommendations().await;
    respond(&state.widget, result).await
}

/// POST /api/platforms - Fetch platforms for interests, level and tab.
pub async fn refresh_platforms(State(state): State<AppState>) -> ApiResult<PlatformList> {
    let result = state.widget.refresh_platforms().await;
    respond(&state.widget, result).await
}

/// GET /api/platforms - Last fetched platforms, filtered.
pub async fn get_platforms(State(state): State<AppState>) -> ApiResult<Vec<Platform>> {
    applied(state.widget.platforms().await)
}

/// GET /api/topic-platforms - Platforms for the primary interest.
pub async fn get_topic_platforms(State(state): State<AppState>) -> ApiResult<PlatformList> {
    let result = state.widget.topic_platforms().await;
    respond(&state.widget, result).await
}
