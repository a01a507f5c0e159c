//! Mock transfer client for testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::filespec::{FileSpec, StatusCode};
use crate::transfer::{Activity, TransferClient, TransferError, TransferOptions};

/// A recorded transfer call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedTransfer {
    /// Logical names of the descriptors handed to the backend, in order.
    pub lfns: Vec<String>,
    pub activity: Activity,
    pub options: TransferOptions,
    /// When the call was made.
    pub timestamp: DateTime<Utc>,
}

/// Mock implementation of the `TransferClient` trait.
///
/// Provides controllable behavior for testing:
/// - Track transfer calls for assertions
/// - Mark all descriptors done, or leave selected ones untransferred
/// - Simulate a hard backend failure, optionally after partial progress
#[derive(Debug, Clone, Default)]
pub struct MockTransferClient {
    calls: Arc<RwLock<Vec<RecordedTransfer>>>,
    failure: Option<String>,
    complete_before_failing: usize,
    skip: HashSet<String>,
}

impl MockTransferClient {
    /// Create a mock that marks every descriptor `done`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the whole dispatch with this message.
    ///
    /// Descriptors before the `complete_before_failing` cutoff (default 0)
    /// still get their outcome fields, simulating a partial transfer.
    pub fn fail_with(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Number of descriptors to complete before the configured failure.
    pub fn complete_before_failing(mut self, n: usize) -> Self {
        self.complete_before_failing = n;
        self
    }

    /// Leave these lfns without outcome fields, simulating files the backend
    /// never got to.
    pub fn skip_lfn(mut self, lfn: impl Into<String>) -> Self {
        self.skip.insert(lfn.into());
        self
    }

    /// All recorded transfer calls.
    pub async fn calls(&self) -> Vec<RecordedTransfer> {
        self.calls.read().await.clone()
    }

    fn mark_done(spec: &mut FileSpec) {
        spec.status = Some("done".to_string());
        spec.status_code = Some(StatusCode::Int(0));
        spec.turl = Some(format!("mock://{}/{}", spec.scope, spec.lfn));
    }
}

#[async_trait]
impl TransferClient for MockTransferClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn transfer(
        &self,
        files: &mut [FileSpec],
        activity: Activity,
        options: &TransferOptions,
    ) -> Result<(), TransferError> {
        self.calls.write().await.push(RecordedTransfer {
            lfns: files.iter().map(|f| f.lfn.clone()).collect(),
            activity,
            options: options.clone(),
            timestamp: Utc::now(),
        });

        if let Some(message) = &self.failure {
            for spec in files.iter_mut().take(self.complete_before_failing) {
                Self::mark_done(spec);
            }
            return Err(TransferError::Backend(message.clone()));
        }

        for spec in files.iter_mut() {
            if !self.skip.contains(&spec.lfn) {
                Self::mark_done(spec);
            }
        }
        Ok(())
    }
}
