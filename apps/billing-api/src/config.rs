//! Billing API configuration module.
//!
//! Configuration is layered: environment variables (`BILLING_*`) override an
//! optional TOML file, which overrides the defaults.
//!
//! ## Example `billing.toml`
//! ```toml
//! host = "127.0.0.1"
//! port = 8080
//! log_filter = "info,billing=debug,tower_http=debug"
//! cors_permissive = true
//! ```

use std::env;

use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Environment variable naming the TOML file.
pub const CONFIG_PATH_VAR: &str = "BILLING_CONFIG";

/// File read when `BILLING_CONFIG` is not set. Missing is fine.
pub const DEFAULT_CONFIG_FILE: &str = "billing.toml";

/// Default tracing filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,billing=debug,tower_http=info";

/// Billing API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// Tracing filter directives, overridden by `RUST_LOG`
    pub log_filter: String,

    /// Allow any origin (for browser clients in development)
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            cors_permissive: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `BILLING_CONFIG` (or `billing.toml`) and the
    /// environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&path)
    }

    /// Load configuration with an explicit TOML path. The file is optional.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let defaults = ServerConfig::default();

        let settings = Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("log_filter", defaults.log_filter)?
            .set_default("cors_permissive", defaults.cors_permissive)?
            .add_source(File::new(path, FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("BILLING").try_parsing(true))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// `host:port`, as accepted by `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue("port".to_string()));
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue("host".to_string()));
        }
        Ok(())
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_temp_toml(name: &str, contents: &str) -> String {
        let path = env::temp_dir().join(format!("{}-{}.toml", name, std::process::id()));
        fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = ServerConfig::load_from("/nonexistent/billing.toml").unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert!(!config.cors_permissive);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = write_temp_toml(
            "billing-config-override",
            "host = \"127.0.0.1\"\nport = 8080\ncors_permissive = true\n",
        );

        let config = ServerConfig::load_from(&path).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.cors_permissive);
        assert_eq!(config.bind_address(), "127.0.0.1:8080");

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_port_zero_rejected() {
        let path = write_temp_toml("billing-config-port-zero", "port = 0\n");

        let err = ServerConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref field) if field == "port"));

        fs::remove_file(path).ok();
    }
}
