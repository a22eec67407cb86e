//! Annotation submission API

use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::services::{Submission, SubmissionHandler};
use crate::AppState;

/// POST /annotations response
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub status: String,
    /// Records appended to the ledger for this submission. Zero when every
    /// tag in a structured-mode submission failed validation.
    pub records_written: usize,
}

/// POST /annotations
///
/// Binary outcome: either every record produced by this submission is
/// durably written, or the write failure surfaces as an error response.
/// There is no partial-success detail.
pub async fn submit_annotation(
    State(state): State<AppState>,
    Json(submission): Json<Submission>,
) -> ApiResult<Json<SubmitResponse>> {
    if submission.data_name.trim().is_empty() {
        return Err(ApiError::BadRequest("data_name must not be empty".to_string()));
    }

    let handler = SubmissionHandler::new(state.config.tag_mode);
    let records_written = handler.handle(&state.ledger, submission).await?;

    Ok(Json(SubmitResponse {
        status: "success".to_string(),
        records_written,
    }))
}

/// Build annotation submission routes
pub fn annotation_routes() -> Router<AppState> {
    Router::new().route("/annotations", post(submit_annotation))
}
