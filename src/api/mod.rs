//! Local JSON API consumed by the page.
//!
//! Every response carries the widget-state revision it was produced at.

mod chat;
mod courses;
mod quiz;
mod recommendations;
mod state;

pub use chat::*;
pub use courses::*;
pub use quiz::*;
pub use recommendations::*;
pub use state::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::{AppError, AppErrorWithRevision};
use crate::widget::{Applied, Widget};

/// Success response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub revision_id: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T, revision_id: i64) -> Self {
        Self {
            success: true,
            data,
            revision_id,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppErrorWithRevision>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T, revision_id: i64) -> ApiResult<T> {
    Ok(ApiResponse::new(data, revision_id))
}

/// Create an error API response.
pub fn error<T: Serialize>(err: AppError, revision_id: i64) -> ApiResult<T> {
    Err(AppErrorWithRevision {
        error: err,
        revision_id,
    })
}

/// Turn a widget outcome into an envelope; errors report the current revision.
async fn respond<T: Serialize>(widget: &Widget, result: Result<Applied<T>, AppError>) -> ApiResult<T> {
    match result {
        Ok(applied) => success(applied.data, applied.revision),
        Err(e) => error(e, widget.revision().await),
    }
}

fn applied<T: Serialize>(applied: Applied<T>) -> ApiResult<T> {
    success(applied.data, applied.revision)
}
