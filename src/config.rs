//! Configuration loading for the TUI.
//!
//! A config file is optional; every field has a built-in default. When a
//! path is given (via `--config` or `RICKMORTY_TUI_CONFIG`) the file is
//! parsed as TOML and validated field by field.

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "https://rickandmortyapi.com/graphql";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TuiConfig {
    pub graphql_endpoint: String,
    pub request_timeout_ms: u64,
    pub tick_interval_ms: u64,
    pub debounce_ms: u64,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ThemeConfig {
    pub dark: bool,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            graphql_endpoint: DEFAULT_GRAPHQL_ENDPOINT.to_string(),
            request_timeout_ms: 10_000,
            tick_interval_ms: 50,
            debounce_ms: 350,
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self { dark: true }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl TuiConfig {
    pub fn load() -> Result<Self, ConfigError> {
        match config_path_from_args().or_else(config_path_from_env) {
            Some(path) => {
                let config = Self::from_path(&path)?;
                config.validate()?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: TuiConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.graphql_endpoint.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "graphql_endpoint",
                reason: "must not be empty".to_string(),
            });
        }
        if !self.graphql_endpoint.starts_with("http://")
            && !self.graphql_endpoint.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                field: "graphql_endpoint",
                reason: "must be an http(s) URL".to_string(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tick_interval_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.debounce_ms > 10_000 {
            return Err(ConfigError::InvalidValue {
                field: "debounce_ms",
                reason: "must be <= 10000".to_string(),
            });
        }
        Ok(())
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var("RICKMORTY_TUI_CONFIG").ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = TuiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.debounce_ms, 350);
        assert!(config.theme.dark);
    }

    #[test]
    fn rejects_empty_endpoint() {
        let config = TuiConfig {
            graphql_endpoint: "  ".to_string(),
            ..TuiConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let config = TuiConfig {
            graphql_endpoint: "ftp://example.com/graphql".to_string(),
            ..TuiConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_intervals() {
        let config = TuiConfig {
            tick_interval_ms: 0,
            ..TuiConfig::default()
        };
        assert!(config.validate().is_err());

        let config = TuiConfig {
            request_timeout_ms: 0,
            ..TuiConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "debounce_ms = 200").unwrap();

        let config = TuiConfig::from_path(file.path()).unwrap();
        assert_eq!(config.debounce_ms, 200);
        assert_eq!(config.graphql_endpoint, DEFAULT_GRAPHQL_ENDPOINT);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not_a_field = true").unwrap();

        assert!(TuiConfig::from_path(file.path()).is_err());
    }
}
