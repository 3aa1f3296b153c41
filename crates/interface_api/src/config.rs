//! API configuration

use serde::Deserialize;

/// API configuration
///
/// The gateway secret lives only here, server-side; it is never serialized
/// back out or exposed to a browser context.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Razorpay key secret used to verify callback signatures
    pub razorpay_key_secret: String,
    /// Log level
    pub log_level: String,
    /// Per-request timeout; verification fails closed rather than hangs
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/consult".to_string(),
            razorpay_key_secret: String::new(),
            log_level: "info".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_secret() {
        let config = ApiConfig::default();
        assert!(config.razorpay_key_secret.is_empty());
    }

    #[test]
    fn test_server_addr() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
    }
}
