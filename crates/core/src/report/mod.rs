//! Result aggregation and the persisted status report.
//!
//! Folds the per-file outcomes and any captured dispatch failure into one
//! ordered mapping keyed by logical file name, with a reserved `error` entry
//! that is always present, and persists it as human-diffable JSON.

mod error_info;
mod status;
mod writer;

pub use error_info::extract_error_info;
pub use status::{StatusEntry, StatusReport, ERROR_KEY};
pub use writer::{report_path, write_report, ReportError};
