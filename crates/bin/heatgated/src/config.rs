//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `heatgate.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use heatgate_adapter_activity_log::ActivityLogConfig;
use heatgate_adapter_tado::TadoConfig;

/// Secret shipped as the default; running with it logs a warning.
pub const INSECURE_DEFAULT_API_KEY: &str = "supersecret";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Shared-secret settings.
    pub auth: AuthConfig,
    /// tado account and token file.
    pub tado: TadoConfig,
    /// Activation retry policy.
    pub activation: ActivationConfig,
    /// Activity log destination.
    pub activity_log: ActivityLogConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `X-API-KEY` configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub api_key: String,
}

/// Activation retry configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ActivationConfig {
    /// Pause between failed activation attempts.
    pub retry_interval_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `heatgate.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("heatgate.toml")?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("HEATGATE_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("HEATGATE_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("HEATGATE_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("API_KEY") {
            self.auth.api_key = val;
        }
        if let Some(val) = var("HEATGATE_TOKEN_FILE") {
            self.tado.token_file = val.into();
        }
        if let Some(val) = var("HEATGATE_LOG_FILE") {
            self.activity_log.path = val.into();
        }
        if let Some(val) = var("HEATGATE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.auth.api_key.is_empty() {
            return Err(ConfigError::Validation("api_key must not be empty".to_string()));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.activation.retry_interval_secs)
    }

    /// Whether the shipped default secret is still in use.
    #[must_use]
    pub fn uses_default_api_key(&self) -> bool {
        self.auth.api_key == INSECURE_DEFAULT_API_KEY
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key: INSECURE_DEFAULT_API_KEY.to_string(),
        }
    }
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            retry_interval_secs: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "heatgated=info,heatgate=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
