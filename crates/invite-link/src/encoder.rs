//! Renders a canonical payload into a review invitation URL.
//!
//! ```text
//! https://{domain}/evaluate-bgl/embed/{account}?p={percent-encode(base64(iv || ct || tag))}
//! ```

use common::{CanonicalPayload, LinkError};
use rand::{rngs::OsRng, CryptoRng, RngCore};

use crate::crypto::{self, KeyMaterial};
use crate::sink::DiagnosticSink;

/// Host used when [`LinkConfig::domain`] is absent or empty.
pub const DEFAULT_DOMAIN: &str = "www.trustpilot.de";

/// Path prefix of the business-generated-link embed endpoint.
pub const EMBED_PATH: &str = "evaluate-bgl/embed";

/// Message of the success event.
pub const LINK_GENERATED: &str = "link generated";

/// Message of the failure event.
pub const LINK_FAILED: &str = "link generation failed";

/// Key material and link settings for one operator account.
#[derive(Clone)]
pub struct LinkConfig {
    /// Base64-encoded AES-256 key.
    pub encryption_key: String,
    /// Base64-encoded HMAC-SHA256 key.
    pub authentication_key: String,
    pub domain: Option<String>,
    /// Operator account identifier rendered into the URL path.
    pub account: String,
}

impl LinkConfig {
    pub fn new(
        encryption_key: impl Into<String>,
        authentication_key: impl Into<String>,
        account: impl Into<String>,
    ) -> Self {
        Self {
            encryption_key: encryption_key.into(),
            authentication_key: authentication_key.into(),
            domain: None,
            account: account.into(),
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// The configured domain, or [`DEFAULT_DOMAIN`].
    pub fn domain(&self) -> &str {
        match self.domain.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => DEFAULT_DOMAIN,
        }
    }

    fn check(&self) -> Result<(), LinkError> {
        let missing: Vec<&str> = [
            ("encryption_key", &self.encryption_key),
            ("authentication_key", &self.authentication_key),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();
        if !missing.is_empty() {
            return Err(LinkError::Configuration(format!(
                "missing required keys: {}",
                missing.join(", ")
            )));
        }
        if self.account.trim().is_empty() {
            return Err(LinkError::Configuration(
                "account identifier is required".into(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for LinkConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkConfig")
            .field("encryption_key", &"[REDACTED]")
            .field("authentication_key", &"[REDACTED]")
            .field("domain", &self.domain())
            .field("account", &self.account)
            .finish()
    }
}

/// Produces invitation links for one [`LinkConfig`], reporting to `S`.
///
/// Holds no mutable state; a single encoder can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct LinkEncoder<S> {
    config: LinkConfig,
    sink: S,
}

impl<S: DiagnosticSink> LinkEncoder<S> {
    pub fn new(config: LinkConfig, sink: S) -> Self {
        Self { config, sink }
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Encrypt, authenticate and render `payload` as an invitation URL,
    /// drawing the IV from the OS CSPRNG.
    ///
    /// # Errors
    ///
    /// - [`LinkError::Configuration`] if a key is empty or not valid base64,
    ///   or the account identifier is empty.
    /// - [`LinkError::Cryptographic`] if the encryption key is not 32 bytes.
    ///
    /// The error is reported to the sink and then returned unchanged.
    pub fn encode(&self, payload: &CanonicalPayload) -> Result<String, LinkError> {
        self.encode_with_rng(payload, &mut OsRng)
    }

    /// Same as [`encode`](Self::encode) with an explicit IV source.
    ///
    /// `rng` is not touched when the configuration is rejected.
    pub fn encode_with_rng<R>(
        &self,
        payload: &CanonicalPayload,
        rng: &mut R,
    ) -> Result<String, LinkError>
    where
        R: RngCore + CryptoRng,
    {
        match self.generate(payload, rng) {
            Ok(url) => {
                self.sink
                    .info(LINK_GENERATED, &payload.reference, &payload.email);
                Ok(url)
            }
            Err(e) => {
                self.sink
                    .error(LINK_FAILED, &e.to_string(), &payload.reference);
                Err(e)
            }
        }
    }

    fn generate<R>(&self, payload: &CanonicalPayload, rng: &mut R) -> Result<String, LinkError>
    where
        R: RngCore + CryptoRng,
    {
        self.config.check()?;
        let keys = KeyMaterial::decode(
            &self.config.encryption_key,
            &self.config.authentication_key,
        )?;

        let plaintext = payload
            .to_canonical_json()
            .map_err(|e| LinkError::Cryptographic(format!("failed to serialise payload: {e}")))?;

        let sealed = crypto::seal(
            &plaintext,
            keys.encryption.as_bytes(),
            keys.authentication.as_bytes(),
            rng,
        )
        .map_err(|e| LinkError::Cryptographic(e.to_string()))?;

        Ok(format!(
            "https://{}/{EMBED_PATH}/{}?p={}",
            self.config.domain(),
            self.config.account,
            sealed.to_query_value()
        ))
    }
}
