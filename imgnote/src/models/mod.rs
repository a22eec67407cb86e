//! Data models for imgnote

pub mod annotation;

pub use annotation::{AnnotationRecord, CapturedMetadata, ImageCandidate, SceneTags};
