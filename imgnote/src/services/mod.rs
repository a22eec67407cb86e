//! Core services: discovery, parsing, metadata derivation, and the ledger

pub mod discovery;
pub mod ledger;
pub mod metadata;
pub mod submission;
pub mod tag_parser;

pub use discovery::{candidate_key, ImageScanner, ScanError};
pub use ledger::{Ledger, LedgerError};
pub use metadata::extract_capture_metadata;
pub use submission::{Submission, SubmissionHandler};
pub use tag_parser::{parse_scene_tag_batch, parse_scene_tags};
