use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "STAGEIN_CONFIG";

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("STAGEIN_").split("_"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration for a run: the file named by `STAGEIN_CONFIG` when set,
/// otherwise environment overrides on top of defaults. A missing file is only
/// an error when it was explicitly requested.
pub fn load_default_config() -> Result<Config, ConfigError> {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => load_config(Path::new(&path)),
        Err(_) => Figment::new()
            .merge(Env::prefixed("STAGEIN_").split("_"))
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string())),
    }
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[report]
filename = "other.json"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.report.filename, "other.json");
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/stagein.toml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[infoservice]
url = "http://localhost:9117/queues"

[trace]
url = "http://localhost:9117/traces"
timeout_secs = 5
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(
            config.infoservice.url.as_deref(),
            Some("http://localhost:9117/queues")
        );
        assert_eq!(config.trace.timeout_secs, 5);
        assert_eq!(config.report.filename, "stagein_status.json");
    }

    #[test]
    fn test_load_config_from_str_invalid() {
        let result = load_config_from_str("report = \"not a table\"");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
