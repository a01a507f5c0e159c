//! Event-service merge stage-in backend.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::filespec::FileSpec;
use crate::infoservice::InfoService;

use super::fetch::{mark_failed, resolve_replica_url, stage_one};
use super::types::{Activity, TransferClient, TransferError, TransferOptions};

/// Stage-in backend for event-service merge jobs.
///
/// Merge inputs are usually pre-merged event ranges parked in the
/// event-service cache, so each file is resolved against the cache layout
/// (`<endpoint>/es_cache/<guid>/<lfn>`) first, falling back to the regular
/// replica path when the cache misses.
pub struct EventServiceClient {
    http: Client,
    info: Arc<InfoService>,
}

impl EventServiceClient {
    pub fn new(info: Arc<InfoService>) -> Self {
        Self {
            http: Client::new(),
            info,
        }
    }

    fn cache_url(endpoint: &str, file: &FileSpec) -> String {
        format!(
            "{}/es_cache/{}/{}",
            endpoint.trim_end_matches('/'),
            file.guid,
            file.lfn
        )
    }
}

#[async_trait]
impl TransferClient for EventServiceClient {
    fn name(&self) -> &str {
        "es_merge"
    }

    async fn transfer(
        &self,
        files: &mut [FileSpec],
        activity: Activity,
        options: &TransferOptions,
    ) -> Result<(), TransferError> {
        let endpoint = self.info.endpoint().ok_or_else(|| {
            TransferError::NoMetadata(
                self.info
                    .queue()
                    .map(|q| q.name.clone())
                    .unwrap_or_else(|| "unknown".to_string()),
            )
        })?;
        info!(
            "staging {} event-service file(s) from {} (activity={})",
            files.len(),
            endpoint,
            activity
        );

        for file in files.iter_mut() {
            let cached = Self::cache_url(endpoint, file);
            match stage_one(&self.http, file, &cached, &options.workdir).await {
                Ok(()) => continue,
                Err(TransferError::FetchFailed { .. }) => {
                    debug!("cache miss for {}, falling back to replica path", file.lfn);
                }
                Err(e) => {
                    warn!("stage-in of {} failed: {}", file.lfn, e);
                    mark_failed(file, &cached, &e);
                    continue;
                }
            }

            let source = resolve_replica_url(endpoint, &file.scope, &file.lfn);
            if let Err(e) = stage_one(&self.http, file, &source, &options.workdir).await {
                warn!("stage-in of {} failed: {}", file.lfn, e);
                mark_failed(file, &source, &e);
            }
        }

        Ok(())
    }
}
