//! Quiz endpoints.

use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use super::{applied, respond, ApiResult};
use crate::quiz::Answer;
use crate::widget::{QuizUpdate, QuizView};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    pub session_id: Uuid,
    pub option: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipRequest {
    pub session_id: Uuid,
}

/// POST /api/quiz - Start a new quiz from the selected interests.
pub async fn start_quiz(State(state): State<AppState>) -> ApiResult<QuizView> {
    let result = state.widget.start_quiz().await;
    respond(&state.widget, result).await
}

/// GET /api/quiz - Current quiz view.
pub async fn get_quiz(State(state): State<AppState>) -> ApiResult<QuizView> {
    applied(state.widget.quiz_view().await)
}

/// POST /api/quiz/answer - Answer the current question.
pub async fn answer_question(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> ApiResult<QuizUpdate> {
    let result = state
        .widget
        .advance_quiz(request.session_id, Answer::Selected(request.option))
        .await;
    respond(&state.widget, result).await
}

/// POST /api/quiz/skip - Skip the current question.
pub async fn skip_question(
    State(state): State<AppState>,
    Json(request): Json<SkipRequest>,
) -> ApiResult<QuizUpdate> {
    let result = state
        .widget
        .advance_quiz(request.session_id, Answer::Skipped)
        .await;
    respond(&state.widget, result).await
}
