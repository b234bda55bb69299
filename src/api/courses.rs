//! Course lifecycle and interaction endpoints.

use axum::{
    body::Bytes,
    extract::{Path, State},
};
use serde::Deserialize;

use super::{error, respond, ApiResult};
use crate::widget::{CourseUpdate, LikeUpdate};
use crate::AppState;

/// Optional body of the completion request.
#[derive(Debug, Default, Deserialize)]
pub struct CompleteCourseRequest {
    #[serde(default)]
    pub score: Option<u32>,
}

/// POST /api/courses/:id/start - Start a course.
pub async fn start_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<CourseUpdate> {
    let result = state.widget.start_course(&id).await;
    respond(&state.widget, result).await
}

/// POST /api/courses/:id/complete - Complete a course, optionally with a score.
pub async fn complete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<CourseUpdate> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        CompleteCourseRequest::default()
    } else {
        match serde_json::from_slice::<CompleteCourseRequest>(&body) {
            Ok(request) => request,
            Err(e) => return error(e.into(), state.widget.revision().await),
        }
    };

    let result = state.widget.complete_course(&id, request.score).await;
    respond(&state.widget, result).await
}

/// POST /api/courses/:id/like - Record a like.
pub async fn like_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<LikeUpdate> {
    let result = state.widget.like_course(&id).await;
    respond(&state.widget, result).await
}
