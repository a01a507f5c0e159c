//! Types for the site/queue metadata service.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while resolving queue metadata.
#[derive(Debug, Error)]
pub enum InfoServiceError {
    /// No metadata endpoint configured.
    #[error("info service URL not configured")]
    NotConfigured,

    /// The metadata request failed.
    #[error("queue metadata request failed for '{queuename}': {reason}")]
    RequestFailed { queuename: String, reason: String },

    /// The response could not be decoded.
    #[error("invalid queue metadata for '{queuename}': {reason}")]
    InvalidMetadata { queuename: String, reason: String },
}

/// Attributes of a processing queue, as served by the metadata endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueData {
    /// Queue name, e.g. `AGLT2_TEST-condor`.
    pub name: String,
    /// Site the queue belongs to.
    #[serde(default)]
    pub site: String,
    /// Storage endpoint replicas are staged from, e.g.
    /// `https://storage.example.org/atlas` or `file:///data/replicas`.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Copytool label the site prefers; informational at this layer.
    #[serde(default)]
    pub copytool: Option<String>,
}
