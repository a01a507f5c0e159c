//! Per-invocation context shared across the pipeline.

use std::path::PathBuf;

/// Job identity carried by the trace report.
///
/// The producer user id arrives percent-encoded on the command line and is
/// decoded once here.
#[derive(Debug, Clone, Default)]
pub struct JobInfo {
    pub produserid: String,
    pub jobid: String,
    pub taskid: String,
    pub jobdefinitionid: String,
}

impl JobInfo {
    pub fn new(
        produserid: impl Into<String>,
        jobid: impl Into<String>,
        taskid: impl Into<String>,
        jobdefinitionid: impl Into<String>,
    ) -> Self {
        let produserid = produserid.into();
        let produserid = match urlencoding::decode(&produserid) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => produserid.replace("%20", " "),
        };
        Self {
            produserid,
            jobid: jobid.into(),
            taskid: taskid.into(),
            jobdefinitionid: jobdefinitionid.into(),
        }
    }
}

/// Immutable description of one stage-in invocation.
///
/// Built once from CLI input and consumed by the transfer dispatcher and the
/// trace report. One process handles exactly one of these.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    /// Queue the job runs against, used to resolve site metadata.
    pub queuename: String,
    /// Working directory; staged files and the status report land here.
    pub workdir: PathBuf,
    pub eventtype: String,
    pub localsite: String,
    pub remotesite: String,
    /// Selects the event-service transfer backend when true.
    pub event_service_merge: bool,
    pub use_pcache: bool,
    pub job: JobInfo,
}
