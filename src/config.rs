//! Configuration management for rebound.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::execution::{RelayOptions, DEFAULT_SEPARATOR};
use crate::search::DEFAULT_SEARCH_URL;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Relay configuration.
    pub relay: RelaySection,
    /// Search configuration.
    pub search: SearchSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Relay configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaySection {
    /// Separator used to join captured lines.
    pub separator: String,
    /// Strip ANSI escapes from captured output.
    pub strip_ansi: bool,
}

impl Default for RelaySection {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            strip_ansi: false,
        }
    }
}

/// Search configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    /// Whether to search for the extracted error at all.
    pub enabled: bool,
    /// Search endpoint.
    pub base_url: String,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: DEFAULT_SEARCH_URL.to_string(),
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level or filter directive.
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: crate::logging::DEFAULT_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    fn apply_vars<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(separator) = var("REBOUND_SEPARATOR") {
            self.relay.separator = separator;
        }

        if let Some(url) = var("REBOUND_SEARCH_URL") {
            if !url.is_empty() {
                self.search.base_url = url;
            }
        }

        if let Some(flag) = var("REBOUND_NO_SEARCH") {
            if matches!(flag.to_ascii_lowercase().as_str(), "1" | "true" | "yes") {
                self.search.enabled = false;
            }
        }

        if let Some(level) = var("REBOUND_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Some(level) = var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(ref separator) = args.separator {
            self.relay.separator = separator.clone();
        }

        if args.strip_ansi {
            self.relay.strip_ansi = true;
        }

        if args.no_search {
            self.search.enabled = false;
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match args.config {
            Some(ref path) => Config::from_file(path)?,
            None => Config::default(),
        };

        config.apply_env();
        config.apply_args(args);

        Ok(config)
    }

    /// Relay options derived from this configuration.
    pub fn relay_options(&self) -> RelayOptions {
        RelayOptions::default()
            .separator(self.relay.separator.clone())
            .strip_ansi(self.relay.strip_ansi)
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.relay.separator, " ");
        assert!(!config.relay.strip_ansi);
        assert!(config.search.enabled);
        assert_eq!(config.search.base_url, DEFAULT_SEARCH_URL);
        assert_eq!(config.log_filter(), "rebound=warn");
    }

    #[test]
    fn test_config_partial_json() {
        let json = r#"{ "relay": { "strip_ansi": true } }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert!(config.relay.strip_ansi);
        assert_eq!(config.relay.separator, " "); // Default
        assert!(config.search.enabled); // Default
    }

    #[test]
    fn test_config_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn test_config_missing_file() {
        let err = Config::from_file(Path::new("/nonexistent/rebound.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_apply_vars() {
        let vars: HashMap<&str, &str> = [
            ("REBOUND_SEPARATOR", "\n"),
            ("REBOUND_SEARCH_URL", "https://example.com/search"),
            ("REBOUND_NO_SEARCH", "TRUE"),
            ("RUST_LOG", "trace"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_vars(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.relay.separator, "\n");
        assert_eq!(config.search.base_url, "https://example.com/search");
        assert!(!config.search.enabled);
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn test_log_level_var_beats_rust_log() {
        let mut config = Config::default();
        config.apply_vars(|key| match key {
            "REBOUND_LOG_LEVEL" => Some("debug".to_string()),
            "RUST_LOG" => Some("trace".to_string()),
            _ => None,
        });
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        let args = Args {
            separator: Some("|".to_string()),
            strip_ansi: true,
            no_search: true,
            log_level: Some("info".to_string()),
            ..Args::default()
        };

        config.apply_args(&args);

        assert_eq!(config.relay.separator, "|");
        assert!(config.relay.strip_ansi);
        assert!(!config.search.enabled);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_relay_options() {
        let mut config = Config::default();
        config.relay.separator = "\n".to_string();
        config.relay.strip_ansi = true;

        let options = config.relay_options();
        assert_eq!(options.separator, "\n");
        assert!(options.strip_ansi);
    }
}
