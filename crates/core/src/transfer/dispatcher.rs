//! Backend selection and the single dispatch call.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

use crate::context::InvocationContext;
use crate::filespec::FileSpec;
use crate::infoservice::InfoService;

use super::es_merge::EventServiceClient;
use super::standard::StandardClient;
use super::types::{Activity, TransferClient, TransferError, TransferOptions};

/// Sentinel code recorded when the backend fails before a structured code can
/// be extracted from its message.
pub const DISPATCH_ERROR_CODE: i64 = -1;

/// The two backend variants a dispatch can select between.
pub enum TransferBackend {
    Standard(StandardClient),
    EventService(EventServiceClient),
}

impl TransferBackend {
    /// Pick the backend and activity for this invocation: the event-service
    /// merge flag selects the event-service variant, everything else is a
    /// standard production stage-in.
    pub fn select(ctx: &InvocationContext, info: Arc<InfoService>) -> (Self, Activity) {
        if ctx.event_service_merge {
            (
                TransferBackend::EventService(EventServiceClient::new(info)),
                Activity::EsEventsRead,
            )
        } else {
            (
                TransferBackend::Standard(StandardClient::new(info)),
                Activity::Production,
            )
        }
    }
}

#[async_trait]
impl TransferClient for TransferBackend {
    fn name(&self) -> &str {
        match self {
            TransferBackend::Standard(c) => c.name(),
            TransferBackend::EventService(c) => c.name(),
        }
    }

    async fn transfer(
        &self,
        files: &mut [FileSpec],
        activity: Activity,
        options: &TransferOptions,
    ) -> Result<(), TransferError> {
        match self {
            TransferBackend::Standard(c) => c.transfer(files, activity, options).await,
            TransferBackend::EventService(c) => c.transfer(files, activity, options).await,
        }
    }
}

/// Outcome of the dispatch call: either clean, or one captured global error.
#[derive(Debug, Clone, Default)]
pub struct DispatchOutcome {
    /// The backend's error message, empty on success.
    pub error: String,
    /// Sentinel code paired with the message; refined later by the extractor.
    pub error_code: i64,
}

impl DispatchOutcome {
    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }
}

/// Invoke the backend exactly once over the whole descriptor batch.
///
/// A backend error is captured, never re-raised: the pipeline proceeds to
/// aggregation with whatever partial outcomes already landed on the
/// descriptors.
pub async fn dispatch<C: TransferClient + ?Sized>(
    client: &C,
    files: &mut [FileSpec],
    activity: Activity,
    options: &TransferOptions,
) -> DispatchOutcome {
    info!(
        "dispatching {} file(s) to '{}' backend (activity={})",
        files.len(),
        client.name(),
        activity
    );

    match client.transfer(files, activity, options).await {
        Ok(()) => DispatchOutcome::default(),
        Err(e) => {
            let error = e.to_string();
            error!("{}", error);
            DispatchOutcome {
                error,
                error_code: DISPATCH_ERROR_CODE,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::JobInfo;
    use crate::infoservice::QueueData;
    use crate::testing::MockTransferClient;
    use std::path::PathBuf;

    fn ctx(event_service_merge: bool) -> InvocationContext {
        InvocationContext {
            queuename: "Q1".to_string(),
            workdir: PathBuf::from("/work"),
            eventtype: "get_sm".to_string(),
            localsite: "L".to_string(),
            remotesite: "R".to_string(),
            event_service_merge,
            use_pcache: false,
            job: JobInfo::default(),
        }
    }

    fn info() -> Arc<InfoService> {
        Arc::new(InfoService::with_queue(QueueData {
            name: "Q1".to_string(),
            site: "S".to_string(),
            endpoint: None,
            copytool: None,
        }))
    }

    #[test]
    fn test_select_standard_backend() {
        let (backend, activity) = TransferBackend::select(&ctx(false), info());
        assert_eq!(backend.name(), "standard");
        assert_eq!(activity, Activity::Production);
    }

    #[test]
    fn test_select_event_service_backend() {
        let (backend, activity) = TransferBackend::select(&ctx(true), info());
        assert_eq!(backend.name(), "es_merge");
        assert_eq!(activity, Activity::EsEventsRead);
    }

    #[tokio::test]
    async fn test_dispatch_captures_backend_failure() {
        let client = MockTransferClient::new().fail_with("error code: 3, details: timeout");
        let options = TransferOptions::for_invocation(&ctx(false));
        let mut files = vec![];

        let outcome = dispatch(&client, &mut files, Activity::Production, &options).await;
        assert!(outcome.is_error());
        assert_eq!(outcome.error_code, DISPATCH_ERROR_CODE);
        assert!(outcome.error.contains("timeout"));
    }

    #[tokio::test]
    async fn test_dispatch_success_is_clean() {
        let client = MockTransferClient::new();
        let options = TransferOptions::for_invocation(&ctx(false));
        let mut files = vec![];

        let outcome = dispatch(&client, &mut files, Activity::Production, &options).await;
        assert!(!outcome.is_error());
        assert_eq!(outcome.error, "");
        assert_eq!(outcome.error_code, 0);
    }
}
