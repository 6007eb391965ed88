//! Common error types shared across crates.

use thiserror::Error;

/// Top-level error type for invitation link generation.
///
/// Variants map to process exit codes returned by the CLI:
/// - [`LinkError::Validation`] → 2
/// - [`LinkError::Configuration`] → 3
/// - [`LinkError::Cryptographic`] → 4
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// One or more required record fields are absent or empty.
    ///
    /// `missing` is always in the fixed order `email`, `name`, `ref`.
    #[error("Missing required fields: {}", .missing.join(", "))]
    Validation { missing: Vec<&'static str> },

    /// Key material or link settings are missing, empty, or cannot be decoded.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Encryption, MAC computation, or plaintext serialisation failed.
    #[error("cryptographic error: {0}")]
    Cryptographic(String),
}

impl LinkError {
    /// Short machine-readable code, safe to put in log fields.
    pub fn code(&self) -> &'static str {
        match self {
            LinkError::Validation { .. } => "validation_error",
            LinkError::Configuration(_) => "configuration_error",
            LinkError::Cryptographic(_) => "cryptographic_error",
        }
    }

    /// Returns the process exit code the CLI should use for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            LinkError::Validation { .. } => 2,
            LinkError::Configuration(_) => 3,
            LinkError::Cryptographic(_) => 4,
        }
    }
}
