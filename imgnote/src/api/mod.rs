//! HTTP API handlers for imgnote

pub mod annotations;
pub mod candidates;
pub mod health;

pub use annotations::annotation_routes;
pub use candidates::candidate_routes;
pub use health::health_routes;
