//! AES-256-CBC + HMAC-SHA256 (encrypt-then-MAC) sealing primitives.
//!
//! This module is intentionally free of URL and logging concerns.
//! It provides the low-level seal operation used by the link encoder.
//!
//! # Sealed message format
//!
//! ```text
//! iv (16 bytes) || aes-256-cbc-pkcs7(plaintext) || hmac-sha256(iv || ciphertext) (32 bytes)
//! ```
//!
//! The whole blob is base64-encoded (standard alphabet, padded) and then
//! percent-encoded for use as a single query value.

pub mod cipher;
pub mod keys;

pub use cipher::{seal, CipherError, SealedMessage, KEY_LEN};
pub use keys::{KeyBytes, KeyMaterial};
