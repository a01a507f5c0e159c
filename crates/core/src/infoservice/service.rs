//! Queue metadata lookup over HTTP.

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::InfoServiceConfig;

use super::types::{InfoServiceError, QueueData};

/// Resolves and caches the metadata of the queue an invocation runs against.
///
/// Initialization failures are the caller's to tolerate: the pipeline logs
/// them and proceeds without metadata, and the transfer backends surface the
/// gap as a dispatch failure when they need an endpoint.
#[derive(Debug)]
pub struct InfoService {
    config: InfoServiceConfig,
    queue: Option<QueueData>,
}

impl InfoService {
    pub fn new(config: InfoServiceConfig) -> Self {
        Self {
            config,
            queue: None,
        }
    }

    /// Build an already-initialized service, for tests and embedding.
    pub fn with_queue(queue: QueueData) -> Self {
        Self {
            config: InfoServiceConfig::default(),
            queue: Some(queue),
        }
    }

    /// Fetch and cache metadata for `queuename`.
    pub async fn init(&mut self, queuename: &str) -> Result<(), InfoServiceError> {
        let base = self
            .config
            .url
            .as_deref()
            .ok_or(InfoServiceError::NotConfigured)?;

        let url = format!("{}/{}", base.trim_end_matches('/'), queuename);
        debug!("fetching queue metadata from {}", url);

        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs as u64))
            .build()
            .map_err(|e| InfoServiceError::RequestFailed {
                queuename: queuename.to_string(),
                reason: e.to_string(),
            })?;

        let response = client.get(&url).send().await.map_err(|e| {
            InfoServiceError::RequestFailed {
                queuename: queuename.to_string(),
                reason: e.to_string(),
            }
        })?;

        let response =
            response
                .error_for_status()
                .map_err(|e| InfoServiceError::RequestFailed {
                    queuename: queuename.to_string(),
                    reason: e.to_string(),
                })?;

        let queue: QueueData =
            response
                .json()
                .await
                .map_err(|e| InfoServiceError::InvalidMetadata {
                    queuename: queuename.to_string(),
                    reason: e.to_string(),
                })?;

        info!(
            "queue metadata resolved: name={}, site={}, endpoint={:?}",
            queue.name, queue.site, queue.endpoint
        );
        self.queue = Some(queue);
        Ok(())
    }

    /// The cached queue metadata, if initialization succeeded.
    pub fn queue(&self) -> Option<&QueueData> {
        self.queue.as_ref()
    }

    /// Storage endpoint of the resolved queue, if any.
    pub fn endpoint(&self) -> Option<&str> {
        self.queue.as_ref().and_then(|q| q.endpoint.as_deref())
    }
}
