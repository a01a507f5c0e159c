use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub infoservice: InfoServiceConfig,
    #[serde(default)]
    pub trace: TraceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Status report configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Filename of the consolidated status report, written under the workdir.
    #[serde(default = "default_report_filename")]
    pub filename: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            filename: default_report_filename(),
        }
    }
}

fn default_report_filename() -> String {
    "stagein_status.json".to_string()
}

/// Info service (site/queue metadata) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InfoServiceConfig {
    /// Base URL of the queue metadata endpoint. When unset, the info service
    /// stays uninitialized and transfers fail with a missing-metadata error.
    #[serde(default)]
    pub url: Option<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for InfoServiceConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: default_timeout(),
        }
    }
}

/// Trace report (telemetry) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TraceConfig {
    /// Collector URL for trace reports. When unset, traces are only logged.
    #[serde(default)]
    pub url: Option<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u32 {
    30
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filename of the plain-text pilot log, written under the workdir.
    #[serde(default = "default_log_filename")]
    pub filename: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filename: default_log_filename(),
        }
    }
}

fn default_log_filename() -> String {
    "stagein.log".to_string()
}
