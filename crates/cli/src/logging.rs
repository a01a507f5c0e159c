//! Tracing initialization: stdout always, plus an optional plain-text pilot
//! log under the workdir.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging. Returns the path of the pilot log when one is opened.
///
/// The env filter still wins over the debug flag, so `RUST_LOG` can narrow or
/// widen what the launcher asked for.
pub fn init(debug: bool, workdir: &Path, filename: &str, nopilotlog: bool) -> Result<Option<PathBuf>> {
    let default_level = if debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_level.into());

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer());

    if nopilotlog {
        registry.init();
        return Ok(None);
    }

    let path = workdir.join(filename);
    let file = File::create(&path)
        .with_context(|| format!("failed to open pilot log at {:?}", path))?;
    registry
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file)),
        )
        .init();
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // the global subscriber can only be installed once per process, so a
    // single test covers the file-layer path
    #[test]
    fn test_init_creates_pilot_log() {
        let workdir = TempDir::new().unwrap();
        let path = init(true, workdir.path(), "stagein.log", false).unwrap();
        let path = path.unwrap();
        assert!(path.exists());
        tracing::info!("pilot log smoke line");
        assert_eq!(path.file_name().unwrap(), "stagein.log");
    }
}
