//! AES-256-CBC encryption with an HMAC-SHA256 tag over `IV || ciphertext`.
//!
//! **Algorithm choice:** the review platform decrypts with AES-256-CBC +
//! PKCS#7 and verifies HMAC-SHA256, so both are fixed by the receiving side.
//! CBC on its own is malleable; the tag must cover the IV as well as the
//! ciphertext, otherwise the first plaintext block can be flipped at will by
//! editing the IV.

use aes::Aes256;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use cbc::cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use rand::{CryptoRng, RngCore};
use sha2::Sha256;
use thiserror::Error;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type HmacSha256 = Hmac<Sha256>;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of the CBC initialisation vector (one AES block).
pub const IV_LEN: usize = 16;

/// AES block size; the padded ciphertext is always a multiple of this.
pub const BLOCK_LEN: usize = 16;

/// Byte length of an HMAC-SHA256 tag.
pub const TAG_LEN: usize = 32;

/// A sealed payload: `IV || ciphertext || tag`.
///
/// The query-string representation is
/// `percent-encode(base64(iv || ciphertext || tag))`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedMessage {
    iv: [u8; IV_LEN],
    ciphertext: Vec<u8>,
    tag: [u8; TAG_LEN],
}

impl SealedMessage {
    pub fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    pub fn tag(&self) -> &[u8; TAG_LEN] {
        &self.tag
    }

    /// Concatenate the three regions in wire order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(IV_LEN + self.ciphertext.len() + TAG_LEN);
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(&self.ciphertext);
        out.extend_from_slice(&self.tag);
        out
    }

    /// Encode to the value carried in the `p` query parameter.
    pub fn to_query_value(&self) -> String {
        urlencoding::encode(&STANDARD.encode(self.to_bytes())).into_owned()
    }

    /// Split a `p` query value back into its regions.
    ///
    /// Structural only: the tag is not verified and nothing is decrypted.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidFormat`] if the value is not
    /// percent-encoded base64, is shorter than `IV_LEN + TAG_LEN` bytes, or
    /// carries a ciphertext that is not a whole number of blocks.
    pub fn parse(query_value: &str) -> Result<Self, CipherError> {
        let b64 = urlencoding::decode(query_value).map_err(|_| CipherError::InvalidFormat)?;
        let bytes = STANDARD
            .decode(b64.as_bytes())
            .map_err(|_| CipherError::InvalidFormat)?;
        if bytes.len() < IV_LEN + TAG_LEN {
            return Err(CipherError::InvalidFormat);
        }

        let (iv_bytes, rest) = bytes.split_at(IV_LEN);
        let (ciphertext, tag_bytes) = rest.split_at(rest.len() - TAG_LEN);
        if ciphertext.len() % BLOCK_LEN != 0 {
            return Err(CipherError::InvalidFormat);
        }

        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(iv_bytes);
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(tag_bytes);

        Ok(Self {
            iv,
            ciphertext: ciphertext.to_vec(),
            tag,
        })
    }
}

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The encryption key is the wrong length (must be [`KEY_LEN`] bytes).
    #[error("invalid encryption key length: expected {KEY_LEN} bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The authentication key was rejected by the MAC.
    #[error("invalid authentication key")]
    InvalidMacKey,

    /// The sealed message string does not match the expected layout.
    #[error("invalid sealed message format")]
    InvalidFormat,
}

/// Encrypt `plaintext` and authenticate the result.
///
/// Key lengths are checked before the IV is drawn from `rng`, so a bad key
/// never consumes randomness.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `enc_key` is not [`KEY_LEN`] bytes.
/// Returns [`CipherError::InvalidMacKey`] if the HMAC cannot be keyed with `auth_key`.
pub fn seal<R>(
    plaintext: &[u8],
    enc_key: &[u8],
    auth_key: &[u8],
    rng: &mut R,
) -> Result<SealedMessage, CipherError>
where
    R: RngCore + CryptoRng,
{
    if enc_key.len() != KEY_LEN {
        return Err(CipherError::InvalidKeyLength(enc_key.len()));
    }
    let mut mac = HmacSha256::new_from_slice(auth_key).map_err(|_| CipherError::InvalidMacKey)?;

    let mut iv = [0u8; IV_LEN];
    rng.fill_bytes(&mut iv);

    let ciphertext = Aes256CbcEnc::new_from_slices(enc_key, &iv)
        .map_err(|_| CipherError::InvalidKeyLength(enc_key.len()))?
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    mac.update(&iv);
    mac.update(&ciphertext);
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&mac.finalize().into_bytes());

    Ok(SealedMessage {
        iv,
        ciphertext,
        tag,
    })
}
