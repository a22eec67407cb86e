//! Capture metadata extraction from image filenames
//!
//! Camera filenames end in a fixed-width timestamp token immediately before
//! the extension (`<place>_YYYYMMDD_HHMMSS.jpg`). The last 15 characters of
//! the stem are the capture id; the first 8 of those are the capture date.
//! The extracted substring is not validated as a calendar date — downstream
//! consumers must tolerate malformed tokens.

use crate::models::CapturedMetadata;
use std::path::Path;

/// Width of the `YYYYMMDD_HHMMSS` token.
const ID_WIDTH: usize = 15;

/// Width of the leading `YYYYMMDD` portion of the token.
const DATE_WIDTH: usize = 8;

/// Derive capture date and id from an image filename or path.
///
/// A stem shorter than the timestamp window is a recoverable parse failure:
/// both fields come back `None` and the caller persists the record without
/// them.
pub fn extract_capture_metadata(data_name: &str) -> CapturedMetadata {
    let file_name = Path::new(data_name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    // Strip the extension; a name without a dot is treated as all stem.
    let stem = match file_name.rfind('.') {
        Some(idx) => &file_name[..idx],
        None => file_name.as_str(),
    };

    // Character-based so multi-byte place names don't skew the window.
    let chars: Vec<char> = stem.chars().collect();
    if chars.len() < ID_WIDTH {
        tracing::debug!(file_name = %file_name, "Filename too short for capture metadata");
        return CapturedMetadata::default();
    }

    let id: String = chars[chars.len() - ID_WIDTH..].iter().collect();
    let datetime: String = id.chars().take(DATE_WIDTH).collect();

    CapturedMetadata {
        datetime: Some(datetime),
        id: Some(id),
    }
}
