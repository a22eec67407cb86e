//! Candidate listing API
//!
//! The empty case is a distinct terminal state, not an empty listing: once
//! every image under the root is annotated the response says so explicitly.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::models::ImageCandidate;
use crate::services::ImageScanner;
use crate::AppState;

/// GET /candidates response
#[derive(Debug, Serialize)]
pub struct CandidateListResponse {
    pub candidates: Vec<ImageCandidate>,
    pub all_annotated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// GET /candidates
///
/// Discovery failures after startup degrade to the all-annotated terminal
/// state rather than an error response.
pub async fn list_candidates(State(state): State<AppState>) -> Json<CandidateListResponse> {
    let scanner = ImageScanner::new(state.config.as_ref().clone());

    let candidates = match scanner.list_candidates(&state.ledger) {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::warn!(error = %e, "Discovery failed, degrading to terminal state");
            Vec::new()
        }
    };

    let all_annotated = candidates.is_empty();
    let message = all_annotated
        .then(|| "All images in this folder have already been annotated.".to_string());

    Json(CandidateListResponse {
        candidates,
        all_annotated,
        message,
    })
}

/// Build candidate listing routes
pub fn candidate_routes() -> Router<AppState> {
    Router::new().route("/candidates", get(list_candidates))
}
