//! Standard stage-in backend.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::filespec::{FileSpec, StatusCode};
use crate::infoservice::InfoService;

use super::fetch::{direct_access_eligible, mark_failed, resolve_replica_url, stage_one};
use super::types::{Activity, TransferClient, TransferError, TransferOptions};

/// Stages replicas from the queue's storage endpoint into the workdir.
///
/// Per-file failures mark that descriptor failed and the batch continues; a
/// missing storage endpoint is a hard dispatch failure.
pub struct StandardClient {
    http: Client,
    info: Arc<InfoService>,
}

impl StandardClient {
    pub fn new(info: Arc<InfoService>) -> Self {
        Self {
            http: Client::new(),
            info,
        }
    }

    fn endpoint(&self) -> Result<&str, TransferError> {
        self.info.endpoint().ok_or_else(|| {
            TransferError::NoMetadata(
                self.info
                    .queue()
                    .map(|q| q.name.clone())
                    .unwrap_or_else(|| "unknown".to_string()),
            )
        })
    }
}

#[async_trait]
impl TransferClient for StandardClient {
    fn name(&self) -> &str {
        "standard"
    }

    async fn transfer(
        &self,
        files: &mut [FileSpec],
        activity: Activity,
        options: &TransferOptions,
    ) -> Result<(), TransferError> {
        let endpoint = self.endpoint()?;
        info!(
            "staging {} file(s) from {} (activity={})",
            files.len(),
            endpoint,
            activity
        );

        for file in files.iter_mut() {
            let source = resolve_replica_url(endpoint, &file.scope, &file.lfn);

            if direct_access_eligible(file) {
                debug!("direct access for {}, no copy", file.lfn);
                file.status = Some("done".to_string());
                file.status_code = Some(StatusCode::Int(0));
                file.turl = Some(source);
                continue;
            }

            if let Err(e) = stage_one(&self.http, file, &source, &options.workdir).await {
                warn!("stage-in of {} failed: {}", file.lfn, e);
                mark_failed(file, &source, &e);
            }
        }

        Ok(())
    }
}
