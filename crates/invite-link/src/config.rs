//! Configuration loading and validation for the `invite-link` binary.
//!
//! All values are read from `TRUSTPILOT_*` environment variables at startup.
//! The process exits with a clear error message if any required variable is
//! missing or empty. The library API never reads the environment; it takes a
//! [`LinkConfig`] built from this.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::encoder::{LinkConfig, DEFAULT_DOMAIN};

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "TRUSTPILOT";

/// Validated binary configuration.
#[derive(Clone, Deserialize)]
pub struct AppConfig {
    /// Base64 AES-256 key (`TRUSTPILOT_ENCRYPTION_KEY`). **Required.**
    pub encryption_key: String,

    /// Base64 HMAC-SHA256 key (`TRUSTPILOT_AUTHENTICATION_KEY`). **Required.**
    pub authentication_key: String,

    /// Review platform host (`TRUSTPILOT_DOMAIN`).
    #[serde(default = "default_domain")]
    pub domain: String,

    /// Operator account identifier (`TRUSTPILOT_ACCOUNT`). **Required.**
    pub account: String,

    /// Tracing log level (`TRUSTPILOT_LOG_LEVEL`, e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_domain() -> String {
    DEFAULT_DOMAIN.into()
}
fn default_log_level() -> String {
    "info".into()
}

impl AppConfig {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or empty.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("failed to build configuration from environment")?;

        let c: AppConfig = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.encryption_key, "TRUSTPILOT_ENCRYPTION_KEY")?;
        ensure_non_empty(&self.authentication_key, "TRUSTPILOT_AUTHENTICATION_KEY")?;
        ensure_non_empty(&self.account, "TRUSTPILOT_ACCOUNT")?;
        Ok(())
    }

    /// The link settings handed to [`crate::LinkEncoder`].
    pub fn link_config(&self) -> LinkConfig {
        LinkConfig::new(
            self.encryption_key.clone(),
            self.authentication_key.clone(),
            self.account.clone(),
        )
        .with_domain(self.domain.clone())
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("encryption_key", &"[REDACTED]")
            .field("authentication_key", &"[REDACTED]")
            .field("domain", &self.domain)
            .field("account", &self.account)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}
