//! Image discovery and done-set filtering
//!
//! Walks the images root two levels deep: immediate subdirectories are
//! "places", files within them are candidates. A file survives when its
//! extension is recognized, its name does not contain the excluded marker
//! substring, and its canonical key is not already in the ledger. The
//! ledger is loaded fresh on every call, so results always reflect the
//! latest completed append.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::AnnotatorConfig;
use crate::models::ImageCandidate;
use crate::services::ledger::Ledger;

/// Discovery errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Images root does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Images root exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Build the canonical image key persisted as `data_name`.
///
/// Discovery and the submission path must agree on this shape exactly; any
/// divergence silently defeats deduplication and images reappear after
/// annotation.
pub fn candidate_key(place: &str, file_name: &str) -> String {
    format!("{}/{}", place, file_name)
}

/// Image scanner over one configured root.
pub struct ImageScanner {
    config: AnnotatorConfig,
}

impl ImageScanner {
    pub fn new(config: AnnotatorConfig) -> Self {
        Self { config }
    }

    /// Enumerate images not yet annotated, grouped by place in traversal
    /// order (file names sorted within each place for determinism).
    ///
    /// An empty result means every image under the root is already
    /// annotated; the boundary layer renders that as a terminal message,
    /// not an empty listing.
    pub fn list_candidates(&self, ledger: &Ledger) -> Result<Vec<ImageCandidate>, ScanError> {
        let root = &self.config.images_root;
        if !root.exists() {
            return Err(ScanError::PathNotFound(root.clone()));
        }
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root.clone()));
        }

        // One fresh load per discovery pass, never cached across calls.
        let done = ledger.done_keys();

        let mut candidates = Vec::new();

        // Depth 2 only: files directly under a place folder. Files at the
        // root itself and anything nested deeper are out of scope.
        let walker = WalkDir::new(root)
            .min_depth(2)
            .max_depth(2)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Error accessing entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().into_owned();
            if !self.config.is_image_file(&file_name) {
                continue;
            }
            // Fixed substring match, not a pattern language.
            if file_name.contains(&self.config.exclude_marker) {
                continue;
            }

            let place = place_of(entry.path(), root);
            let key = candidate_key(&place, &file_name);
            if done.contains(&key) {
                continue;
            }

            candidates.push(ImageCandidate {
                place,
                path: key,
                file_name,
            });
        }

        tracing::debug!(
            root = %root.display(),
            candidates = candidates.len(),
            annotated = done.len(),
            "Discovery pass complete"
        );

        Ok(candidates)
    }
}

/// Place name of a candidate: its parent directory relative to the root.
fn place_of(path: &Path, root: &Path) -> String {
    path.parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
