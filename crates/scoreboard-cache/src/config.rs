//! Configuration loading and typed config structures for the service.
//!
//! The canonical configuration lives in `scoreboard-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror
//! the YAML structure, a loader that reads the file, and a validation
//! step that rejects invalid values before the process starts serving.
//! A process must never begin serving with a silently-broken cache
//! configuration, so validation failures abort startup.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is not usable.
    #[error("invalid configuration: {message}")]
    Invalid {
        /// What was wrong with the value.
        message: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
///
/// Mirrors the structure of `scoreboard-config.yaml`. All fields have
/// defaults, so an absent file yields a fully usable configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    /// Cache freshness settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Infrastructure connection settings.
    #[serde(default)]
    pub infrastructure: InfrastructureConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `DRAGONFLY_URL` overrides `infrastructure.dragonfly_url`
    /// - `SCOREBOARD_PORT` overrides `infrastructure.api_port`
    /// - `SCOREBOARD_TTL_SECONDS` overrides `cache.ttl_seconds`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if an environment override does not
    /// parse.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML,
    /// or [`ConfigError::Invalid`] if an environment override does not
    /// parse.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Override settings with environment variables when set.
    ///
    /// Allows Docker Compose (or any deployment) to adjust connection
    /// strings and the TTL without modifying the YAML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a numeric override is not a
    /// valid number; a typo must not silently fall back to the file
    /// value.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("DRAGONFLY_URL") {
            self.infrastructure.dragonfly_url = val;
        }
        if let Ok(val) = std::env::var("SCOREBOARD_PORT") {
            self.infrastructure.api_port =
                val.parse::<u16>().map_err(|e| ConfigError::Invalid {
                    message: format!("SCOREBOARD_PORT is not a valid port: {e}"),
                })?;
        }
        if let Ok(val) = std::env::var("SCOREBOARD_TTL_SECONDS") {
            self.cache.ttl_seconds =
                val.parse::<i64>().map_err(|e| ConfigError::Invalid {
                    message: format!("SCOREBOARD_TTL_SECONDS is not a valid integer: {e}"),
                })?;
        }
        Ok(())
    }

    /// Reject configurations the service must not start with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the TTL is negative. A zero
    /// TTL is valid and disables caching; a negative one is always a
    /// mistake and must not silently disable the cache.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache.ttl_seconds < 0 {
            return Err(ConfigError::Invalid {
                message: format!(
                    "cache.ttl_seconds must be >= 0, got {}",
                    self.cache.ttl_seconds
                ),
            });
        }
        Ok(())
    }
}

/// Cache freshness settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Snapshot freshness window in seconds. Zero disables caching.
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: i64,
}

impl CacheConfig {
    /// The freshness window as a [`chrono::Duration`].
    ///
    /// Call [`ServiceConfig::validate`] first; a negative TTL yields a
    /// negative duration, which never matches the freshness rule.
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.ttl_seconds)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
        }
    }
}

/// Infrastructure connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InfrastructureConfig {
    /// Dragonfly (Redis-compatible) URL.
    #[serde(default = "default_dragonfly_url")]
    pub dragonfly_url: String,

    /// Host address the API server binds to.
    #[serde(default = "default_api_host")]
    pub api_host: String,

    /// TCP port the API server listens on.
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Deadline for one provider fetch in milliseconds. Zero disables
    /// the deadline.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl InfrastructureConfig {
    /// The fetch deadline, or `None` when disabled.
    pub const fn request_timeout(&self) -> Option<std::time::Duration> {
        if self.request_timeout_ms == 0 {
            None
        } else {
            Some(std::time::Duration::from_millis(self.request_timeout_ms))
        }
    }
}

impl Default for InfrastructureConfig {
    fn default() -> Self {
        Self {
            dragonfly_url: default_dragonfly_url(),
            api_host: default_api_host(),
            api_port: default_api_port(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_ttl_seconds() -> i64 {
    300
}

fn default_dragonfly_url() -> String {
    "redis://localhost:6379".to_owned()
}

fn default_api_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_api_port() -> u16 {
    8080
}

const fn default_request_timeout_ms() -> u64 {
    5000
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ServiceConfig::default();
        assert_eq!(config.cache.ttl_seconds, 300);
        assert_eq!(config.infrastructure.api_port, 8080);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
cache:
  ttl_seconds: 60

infrastructure:
  dragonfly_url: "redis://testhost:6379"
  api_host: "127.0.0.1"
  api_port: 9090
  request_timeout_ms: 2500

logging:
  level: "debug"
"#;

        let config = ServiceConfig::parse(yaml).unwrap();
        assert_eq!(config.cache.ttl_seconds, 60);
        assert_eq!(config.cache.ttl(), chrono::Duration::seconds(60));
        assert_eq!(config.infrastructure.dragonfly_url, "redis://testhost:6379");
        assert_eq!(config.infrastructure.api_port, 9090);
        assert_eq!(
            config.infrastructure.request_timeout(),
            Some(std::time::Duration::from_millis(2500))
        );
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "cache:\n  ttl_seconds: 0\n";
        let config = ServiceConfig::parse(yaml).unwrap();

        // TTL is overridden; everything else uses defaults.
        assert_eq!(config.cache.ttl_seconds, 0);
        assert_eq!(config.infrastructure.api_port, 8080);
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(ServiceConfig::parse("").is_ok());
    }

    #[test]
    fn zero_ttl_is_valid() {
        let yaml = "cache:\n  ttl_seconds: 0\n";
        let config = ServiceConfig::parse(yaml).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn negative_ttl_is_rejected() {
        let yaml = "cache:\n  ttl_seconds: -1\n";
        let config = ServiceConfig::parse(yaml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ttl_seconds"));
    }

    #[test]
    fn zero_timeout_disables_the_deadline() {
        let yaml = "infrastructure:\n  request_timeout_ms: 0\n";
        let config = ServiceConfig::parse(yaml).unwrap();
        assert_eq!(config.infrastructure.request_timeout(), None);
    }
}
