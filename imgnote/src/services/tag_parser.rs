//! Structured tag string parsing
//!
//! A structured tag arrives as comma-separated `key:value` pairs, e.g.
//! `"category: Indoor, sub-category: Kitchen, tag: Sink"`. Recognized keys
//! are exactly `category`, `sub-category`, `tag` (case-sensitive, compared
//! after trimming). Unrecognized keys and colon-less segments are silently
//! ignored. A triple is accepted only when all three slots are non-empty;
//! a rejected tag string never aborts its siblings in the same submission.

use crate::models::SceneTags;

/// Parse one tag string into a validated triple.
///
/// Returns `None` when any of the three recognized keys is missing or maps
/// to an empty value.
pub fn parse_scene_tags(raw: &str) -> Option<SceneTags> {
    let mut category = String::new();
    let mut sub_category = String::new();
    let mut tag = String::new();

    for segment in raw.split(',') {
        // Split on the first colon only, so values may themselves contain
        // colons.
        let Some((key, value)) = segment.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        match key {
            "category" => category = value.to_string(),
            "sub-category" => sub_category = value.to_string(),
            "tag" => tag = value.to_string(),
            _ => {}
        }
    }

    if category.is_empty() || sub_category.is_empty() || tag.is_empty() {
        tracing::debug!(raw = %raw, "Tag string rejected: incomplete triple");
        return None;
    }

    Some(SceneTags {
        category,
        sub_category,
        tag,
    })
}

/// Parse a batch of tag strings, keeping only accepted triples.
///
/// Failure isolation is per tag: a malformed string contributes nothing and
/// the rest of the batch is still processed.
pub fn parse_scene_tag_batch<S: AsRef<str>>(raw_tags: &[S]) -> Vec<SceneTags> {
    raw_tags
        .iter()
        .filter_map(|raw| parse_scene_tags(raw.as_ref()))
        .collect()
}
