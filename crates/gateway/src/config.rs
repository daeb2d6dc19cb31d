//! Configuration loading and validation for the gateway.
//!
//! All values are read from environment variables at startup. The process
//! will exit with a clear error message if any variable cannot be parsed.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated gateway configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Filesystem path of the base64-encoded symmetric key file, written by
    /// the external provisioning process.
    #[serde(default = "default_key_path")]
    pub key_path: String,

    /// Port the HTTP server listens on.
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Upper bound (milliseconds) on a single decryption call.
    #[serde(default = "default_decrypt_timeout_ms")]
    pub decrypt_timeout_ms: u64,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_key_path() -> String {
    "/run/symmetric_key".into()
}
fn default_http_port() -> u16 {
    80
}
fn default_decrypt_timeout_ms() -> u64 {
    5000
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.key_path.trim().is_empty() {
            anyhow::bail!("KEY_PATH must not be empty");
        }
        if self.decrypt_timeout_ms == 0 {
            anyhow::bail!("DECRYPT_TIMEOUT_MS must be > 0");
        }
        Ok(())
    }

    /// The decrypt-step bound as a [`Duration`].
    pub fn decrypt_timeout(&self) -> Duration {
        Duration::from_millis(self.decrypt_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_key_path(), "/run/symmetric_key");
        assert_eq!(default_http_port(), 80);
        assert_eq!(default_decrypt_timeout_ms(), 5000);
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_rejects_empty_key_path() {
        let cfg = Config {
            key_path: "  ".into(),
            http_port: default_http_port(),
            decrypt_timeout_ms: default_decrypt_timeout_ms(),
            log_level: default_log_level(),
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let cfg = Config {
            key_path: default_key_path(),
            http_port: default_http_port(),
            decrypt_timeout_ms: 0,
            log_level: default_log_level(),
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn decrypt_timeout_converts_to_duration() {
        let cfg = Config {
            key_path: default_key_path(),
            http_port: default_http_port(),
            decrypt_timeout_ms: 250,
            log_level: default_log_level(),
        };
        assert_eq!(cfg.decrypt_timeout(), Duration::from_millis(250));
    }
}
