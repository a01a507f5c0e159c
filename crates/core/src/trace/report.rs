//! Trace report: best-effort telemetry for one stage-in invocation.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::TraceConfig;
use crate::context::{InvocationContext, JobInfo};

/// Environment variable naming the processing queue for telemetry.
pub const PILOT_SITENAME_ENV: &str = "PILOT_SITENAME";

/// One telemetry record per invocation, sent fire-and-forget.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceReport {
    pub uuid: String,
    /// Processing queue, from `PILOT_SITENAME` (empty when unset).
    pub pq: String,
    pub local_site: String,
    pub remote_site: String,
    pub dataset: String,
    pub event_type: String,
    pub usr_dn: String,
    pub job_id: String,
    pub task_id: String,
    pub job_definition_id: String,
    pub created_at: DateTime<Utc>,
}

impl TraceReport {
    /// Build the report from the invocation context and stamp job identity.
    pub fn new(ctx: &InvocationContext) -> Self {
        let mut report = Self {
            uuid: Uuid::new_v4().to_string(),
            pq: std::env::var(PILOT_SITENAME_ENV).unwrap_or_default(),
            local_site: ctx.localsite.clone(),
            remote_site: ctx.remotesite.clone(),
            dataset: String::new(),
            event_type: ctx.eventtype.clone(),
            usr_dn: String::new(),
            job_id: String::new(),
            task_id: String::new(),
            job_definition_id: String::new(),
            created_at: Utc::now(),
        };
        report.init(&ctx.job);
        report
    }

    /// Stamp job identity onto the report.
    pub fn init(&mut self, job: &JobInfo) {
        self.usr_dn = job.produserid.clone();
        self.job_id = job.jobid.clone();
        self.task_id = job.taskid.clone();
        self.job_definition_id = job.jobdefinitionid.clone();
    }

    /// Send the report to the collector. Best effort: every failure is logged
    /// and swallowed, the pipeline never depends on the outcome.
    pub async fn send(&self, config: &TraceConfig) {
        let Some(url) = config.url.as_deref() else {
            debug!("trace collector not configured, skipping trace report");
            return;
        };

        let client = match Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                warn!("failed to build trace client: {}", e);
                return;
            }
        };

        match client.post(url).json(self).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("trace report {} sent", self.uuid);
            }
            Ok(response) => {
                warn!("trace collector returned {}", response.status());
            }
            Err(e) => {
                warn!("failed to send trace report: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn ctx() -> InvocationContext {
        InvocationContext {
            queuename: "Q1".to_string(),
            workdir: PathBuf::from("/work"),
            eventtype: "get_sm".to_string(),
            localsite: "LOCAL".to_string(),
            remotesite: "REMOTE".to_string(),
            event_service_merge: false,
            use_pcache: false,
            job: JobInfo::new("user%20one", "j1", "t1", "jd1"),
        }
    }

    #[test]
    fn test_new_stamps_context_and_job() {
        let report = TraceReport::new(&ctx());
        assert_eq!(report.local_site, "LOCAL");
        assert_eq!(report.remote_site, "REMOTE");
        assert_eq!(report.event_type, "get_sm");
        assert_eq!(report.usr_dn, "user one");
        assert_eq!(report.job_id, "j1");
        assert_eq!(report.dataset, "");
        assert!(!report.uuid.is_empty());
    }

    #[test]
    fn test_serializes_camel_case() {
        let report = TraceReport::new(&ctx());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("localSite").is_some());
        assert!(json.get("eventType").is_some());
        assert!(json.get("usrDn").is_some());
    }

    #[tokio::test]
    async fn test_send_without_collector_is_noop() {
        let report = TraceReport::new(&ctx());
        // must not panic or error
        report.send(&TraceConfig::default()).await;
    }

    #[tokio::test]
    async fn test_send_unreachable_collector_is_swallowed() {
        let report = TraceReport::new(&ctx());
        report
            .send(&TraceConfig {
                url: Some("http://127.0.0.1:1/traces".to_string()),
                timeout_secs: 1,
            })
            .await;
    }
}
