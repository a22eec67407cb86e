//! Annotation record and related value types
//!
//! `AnnotationRecord` is the persisted shape, one per reviewed image.
//! `ImageCandidate` and `CapturedMetadata` are transient: rebuilt on every
//! discovery pass / submission and never stored.

use serde::{Deserialize, Serialize};

/// A structured scene tag parsed from one `key:value` tag string.
///
/// Serialized with the `sub-category` key for compatibility with the
/// persisted ledger format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneTags {
    pub category: String,
    #[serde(rename = "sub-category")]
    pub sub_category: String,
    pub tag: String,
}

/// One reviewed image, as persisted in the ledger file.
///
/// Exactly one of `tags` (raw mode) or `scene_tags` (structured mode) is
/// populated; the choice is a configuration flag, not data-dependent.
/// Records are append-only: once written they are never mutated or
/// reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// Canonical image key: `<place>/<file_name>` relative to the images
    /// root. Must match what discovery constructs, or deduplication is
    /// silently defeated.
    pub data_name: String,

    /// Raw-mode tag strings, stored verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Structured-mode tag triple.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene_tags: Option<SceneTags>,

    /// Sub-location folder name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,

    /// Capture date (YYYYMMDD) derived from the filename.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,

    /// Capture identifier (YYYYMMDD_HHMMSS) derived from the filename.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Lifecycle tag for downstream triage (e.g. "not review").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// One undecided image offered to the reviewer. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCandidate {
    /// Sub-location folder name.
    pub place: String,
    /// Canonical image key, identical to the `data_name` a submission for
    /// this image must carry.
    pub path: String,
    /// Bare file name within the place folder.
    pub file_name: String,
}

/// Capture date and identifier derived from a filename. Pure value, no
/// persisted identity; both fields are absent when extraction fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedMetadata {
    pub datetime: Option<String>,
    pub id: Option<String>,
}
