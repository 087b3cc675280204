//! Engine configuration
//!
//! Defaults cover a local deployment. A YAML file named by `FORMS_CONFIG`
//! overrides them, and `FORMS_ADDR` overrides the listen address last.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Environment variable naming a YAML config file
pub const CONFIG_PATH_ENV: &str = "FORMS_CONFIG";

/// Environment variable overriding the listen address
pub const ADDR_ENV: &str = "FORMS_ADDR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CONFIG/read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("CONFIG/parse: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Address the HTTP surface binds to
    pub listen_addr: String,

    // === Paging ===
    /// Submissions returned when the caller gives no limit
    pub default_page_size: usize,

    /// Upper bound on any requested page
    pub max_page_size: usize,

    /// Forms per page of the hotline listing
    pub hotline_page_size: usize,

    // === Gate ===
    /// Gate decisions retained in the audit log
    pub audit_max_entries: usize,

    // === Summaries ===
    /// chrono format string for dates shown in summaries and views
    pub date_display_format: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8787".to_string(),
            default_page_size: 50,
            max_page_size: 500,
            hotline_page_size: 12,
            audit_max_entries: 10_000,
            date_display_format: "%B %-d, %Y".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse a YAML document; missing keys keep their defaults
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// Defaults, then `FORMS_CONFIG`, then `FORMS_ADDR`
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load(path)?,
            Err(_) => Self::default(),
        };
        if let Ok(addr) = std::env::var(ADDR_ENV) {
            config.listen_addr = addr;
        }
        Ok(config)
    }

    /// Resolve a caller-supplied page size against the configured bounds
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = EngineConfig::from_yaml("hotline_page_size: 6\nlisten_addr: 127.0.0.1:9000\n").unwrap();
        assert_eq!(config.hotline_page_size, 6);
        assert_eq!(config.listen_addr, "127.0.0.1:9000");
        assert_eq!(config.default_page_size, 50);
        assert_eq!(config.date_display_format, "%B %-d, %Y");
    }

    #[test]
    fn test_invalid_yaml() {
        let err = EngineConfig::from_yaml("max_page_size: [1, 2]").unwrap_err();
        assert!(err.to_string().starts_with("CONFIG/parse"));
    }

    #[test]
    fn test_page_size_clamped() {
        let config = EngineConfig::default();
        assert_eq!(config.page_size(None), 50);
        assert_eq!(config.page_size(Some(0)), 1);
        assert_eq!(config.page_size(Some(10_000)), 500);
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::load("/nonexistent/forms.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
