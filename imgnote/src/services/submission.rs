//! Annotation submission handling
//!
//! One reviewer submission carries a `data_name`, a batch of tag strings,
//! and optionally a place and status. Metadata extraction failure is
//! tolerated (the record persists without derived fields). In structured
//! mode each accepted tag triple fans out into its own record, so a single
//! submission can yield several records, or zero when every tag fails
//! validation. In raw mode the submission maps to exactly one record
//! carrying the verbatim tag list. The caller sees a binary outcome: all
//! produced records durably written, or a submission failure.

use serde::Deserialize;

use crate::config::TagMode;
use crate::models::AnnotationRecord;
use crate::services::ledger::{Ledger, LedgerError};
use crate::services::metadata::extract_capture_metadata;
use crate::services::tag_parser::parse_scene_tag_batch;

/// One reviewer submission as received from the boundary layer.
#[derive(Debug, Clone, Deserialize)]
pub struct Submission {
    /// Canonical image key, echoed back from a discovery candidate.
    pub data_name: String,
    /// Tag strings; interpretation depends on the configured mode.
    pub tags: Vec<String>,
    /// Sub-location folder name.
    #[serde(default)]
    pub place: Option<String>,
    /// Lifecycle tag for downstream triage.
    #[serde(default)]
    pub status: Option<String>,
}

/// Orchestrates parsing, metadata extraction, and ledger append for one
/// submission.
pub struct SubmissionHandler {
    mode: TagMode,
}

impl SubmissionHandler {
    pub fn new(mode: TagMode) -> Self {
        Self { mode }
    }

    /// Process one submission, returning the number of records written.
    ///
    /// Zero is a valid outcome in structured mode (every tag rejected);
    /// the append phase is then a no-op and still reports success.
    pub async fn handle(
        &self,
        ledger: &Ledger,
        submission: Submission,
    ) -> Result<usize, LedgerError> {
        let records = self.build_records(&submission);

        ledger.append_all(&records).await?;

        tracing::info!(
            data_name = %submission.data_name,
            records = records.len(),
            "Submission persisted"
        );

        Ok(records.len())
    }

    /// Expand a submission into the records it produces, without touching
    /// the ledger.
    pub fn build_records(&self, submission: &Submission) -> Vec<AnnotationRecord> {
        let meta = extract_capture_metadata(&submission.data_name);

        let base = AnnotationRecord {
            data_name: submission.data_name.clone(),
            tags: None,
            scene_tags: None,
            place: submission.place.clone(),
            datetime: meta.datetime,
            id: meta.id,
            status: submission.status.clone(),
        };

        match self.mode {
            TagMode::Raw => {
                let mut record = base;
                record.tags = Some(submission.tags.clone());
                vec![record]
            }
            TagMode::Structured => parse_scene_tag_batch(&submission.tags)
                .into_iter()
                .map(|triple| {
                    let mut record = base.clone();
                    record.scene_tags = Some(triple);
                    record
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(tags: &[&str]) -> Submission {
        Submission {
            data_name: "kitchen/cam1_20240924_120431.jpg".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            place: Some("kitchen".to_string()),
            status: None,
        }
    }

    #[test]
    fn test_raw_mode_single_record() {
        let handler = SubmissionHandler::new(TagMode::Raw);
        let records = handler.build_records(&submission(&["sink", "faucet"]));

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].tags.as_deref(),
            Some(&["sink".to_string(), "faucet".to_string()][..])
        );
        assert!(records[0].scene_tags.is_none());
        assert_eq!(records[0].datetime.as_deref(), Some("20240924"));
        assert_eq!(records[0].id.as_deref(), Some("20240924_120431"));
    }

    #[test]
    fn test_structured_mode_fans_out() {
        let handler = SubmissionHandler::new(TagMode::Structured);
        let records = handler.build_records(&submission(&[
            "category: Indoor, sub-category: Kitchen, tag: Sink",
            "category: Indoor, sub-category: Kitchen, tag: Faucet",
        ]));

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.tags.is_none()));
        assert_eq!(records[0].scene_tags.as_ref().unwrap().tag, "Sink");
        assert_eq!(records[1].scene_tags.as_ref().unwrap().tag, "Faucet");
    }

    #[test]
    fn test_structured_mode_drops_invalid_tags_only() {
        let handler = SubmissionHandler::new(TagMode::Structured);
        let records = handler.build_records(&submission(&[
            "not-a-kv-pair",
            "category: Indoor, sub-category: Kitchen, tag: Sink",
        ]));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].scene_tags.as_ref().unwrap().tag, "Sink");
    }

    #[test]
    fn test_structured_mode_can_yield_zero_records() {
        let handler = SubmissionHandler::new(TagMode::Structured);
        let records = handler.build_records(&submission(&["category: Indoor"]));
        assert!(records.is_empty());
    }

    #[test]
    fn test_short_filename_still_produces_record() {
        let handler = SubmissionHandler::new(TagMode::Raw);
        let mut sub = submission(&["sink"]);
        sub.data_name = "kitchen/x.jpg".to_string();

        let records = handler.build_records(&sub);
        assert_eq!(records.len(), 1);
        assert!(records[0].datetime.is_none());
        assert!(records[0].id.is_none());
    }
}
