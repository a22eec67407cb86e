//! imgnote library interface
//!
//! Image-labeling ledger service: discovers not-yet-annotated images under
//! a configured root, accepts tag submissions from a reviewer, and appends
//! each as a durable record to a JSON-backed ledger.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::config::AnnotatorConfig;
use crate::services::Ledger;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Resolved runtime configuration, fixed for the process lifetime
    pub config: Arc<AnnotatorConfig>,
    /// Shared ledger; all mutations serialize through its write lock
    pub ledger: Arc<Ledger>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: AnnotatorConfig) -> Self {
        let ledger = Ledger::new(config.ledger_path.clone());
        Self {
            config: Arc::new(config),
            ledger: Arc::new(ledger),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let images_root = state.config.images_root.clone();

    Router::new()
        .merge(api::candidate_routes())
        .merge(api::annotation_routes())
        .merge(api::health_routes())
        // Serve raw image files so a reviewer UI can render candidates
        .nest_service("/static", ServeDir::new(images_root))
        .with_state(state)
}
