//! Persisting the status report.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::config::ReportConfig;

use super::status::StatusReport;

/// Errors that can occur while persisting the status report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to serialize status report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write status report to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where the report lands for this invocation.
pub fn report_path(workdir: &Path, config: &ReportConfig) -> PathBuf {
    workdir.join(&config.filename)
}

/// Serialize the report as pretty JSON, preserving key order.
pub fn write_report(path: &Path, report: &StatusReport) -> Result<(), ReportError> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    std::fs::write(path, json).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("wrote status report to {}", path.display());
    Ok(())
}
