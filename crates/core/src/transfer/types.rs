//! Types for the transfer backend contract.

use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::context::InvocationContext;
use crate::filespec::FileSpec;

/// Backend activity label, influencing routing/protocol choice downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    /// Standard production stage-in.
    Production,
    /// Event-service merge reads.
    EsEventsRead,
}

impl Activity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Production => "pr",
            Activity::EsEventsRead => "es_events_read",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fixed configuration bundle handed to the backend for one dispatch.
#[derive(Debug, Clone)]
pub struct TransferOptions {
    pub workdir: PathBuf,
    pub cwd: PathBuf,
    pub use_container: bool,
    pub use_pcache: bool,
    pub use_bulk: bool,
}

impl TransferOptions {
    /// The bundle as the dispatcher assembles it: cwd mirrors the workdir,
    /// container and bulk modes are always off at this layer.
    pub fn for_invocation(ctx: &InvocationContext) -> Self {
        Self {
            workdir: ctx.workdir.clone(),
            cwd: ctx.workdir.clone(),
            use_container: false,
            use_pcache: ctx.use_pcache,
            use_bulk: false,
        }
    }
}

/// Errors raised by transfer backends.
///
/// The Display format is a stable contract: the supervisor-facing error
/// extractor recovers the code after `error code: ` and the message after
/// `details: `, so every variant renders both.
#[derive(Debug, Error)]
pub enum TransferError {
    /// No queue metadata, so no replica endpoint to stage from.
    #[error("error code: 1099, details: no queue metadata available for queue '{0}'")]
    NoMetadata(String),

    /// A replica could not be fetched from its resolved source.
    #[error("error code: 1103, details: failed to fetch replica {lfn}: {reason}")]
    FetchFailed { lfn: String, reason: String },

    /// Staged size differs from the declared size.
    #[error("error code: 1120, details: size mismatch for {lfn}: expected {expected}, got {actual}")]
    SizeMismatch {
        lfn: String,
        expected: u64,
        actual: u64,
    },

    /// Staged checksum differs from the declared checksum.
    #[error(
        "error code: 1132, details: checksum mismatch for {lfn}: expected {expected}, got {actual}"
    )]
    ChecksumMismatch {
        lfn: String,
        expected: String,
        actual: String,
    },

    /// Could not write the staged file into the workdir.
    #[error("error code: 1137, details: failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    /// Opaque failure message surfaced by an embedded backend.
    #[error("{0}")]
    Backend(String),
}

impl TransferError {
    /// Numeric code matching the one embedded in the Display output.
    pub fn code(&self) -> i64 {
        match self {
            TransferError::NoMetadata(_) => 1099,
            TransferError::FetchFailed { .. } => 1103,
            TransferError::SizeMismatch { .. } => 1120,
            TransferError::ChecksumMismatch { .. } => 1132,
            TransferError::WriteFailed { .. } => 1137,
            TransferError::Backend(_) => 0,
        }
    }
}

/// Trait for transfer backends.
///
/// The backend receives temporary write access to the descriptors for the
/// duration of the call and fills in their outcome fields. A returned error
/// is a hard dispatch failure; partially populated outcomes are expected and
/// surface downstream as "(not transferred)".
#[async_trait]
pub trait TransferClient: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Perform the stage-in for the whole descriptor batch.
    async fn transfer(
        &self,
        files: &mut [FileSpec],
        activity: Activity,
        options: &TransferOptions,
    ) -> Result<(), TransferError>;
}
