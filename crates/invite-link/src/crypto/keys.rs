//! Decoded key material for a single link-generation call.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::LinkError;

/// Owned key bytes decoded from their base64 transport form.
///
/// When this type is dropped, the memory is overwritten with zeroes to
/// minimise the window during which plaintext key material lives in RAM.
pub struct KeyBytes(Vec<u8>);

impl KeyBytes {
    /// Decode a standard-alphabet, padded base64 key.
    ///
    /// `name` identifies the key in error messages; the key itself is never
    /// included.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Configuration`] if the input is not valid base64
    /// or decodes to zero bytes.
    pub fn from_base64(encoded: &str, name: &str) -> Result<Self, LinkError> {
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| LinkError::Configuration(format!("{name} is not valid base64: {e}")))?;
        if bytes.is_empty() {
            return Err(LinkError::Configuration(format!(
                "{name} decodes to an empty key"
            )));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Drop for KeyBytes {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for KeyBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material, not even in debug builds.
        f.write_str("KeyBytes([REDACTED])")
    }
}

/// The encryption and authentication keys, decoded together.
#[derive(Debug)]
pub struct KeyMaterial {
    pub encryption: KeyBytes,
    pub authentication: KeyBytes,
}

impl KeyMaterial {
    /// Decode both keys. The encryption key is decoded first, so a caller
    /// with two bad keys sees the encryption key's error.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Configuration`] if either key fails to decode.
    pub fn decode(encryption_key: &str, authentication_key: &str) -> Result<Self, LinkError> {
        Ok(Self {
            encryption: KeyBytes::from_base64(encryption_key, "encryption key")?,
            authentication: KeyBytes::from_base64(authentication_key, "authentication key")?,
        })
    }
}
