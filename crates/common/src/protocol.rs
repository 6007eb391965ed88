//! Record and payload types exchanged with the review platform.
//!
//! [`InvitationRecord`] is the loose input shape callers hand in.
//! [`CanonicalPayload`] is the validated shape whose JSON serialisation is
//! the exact encryption plaintext, so its field order is part of the wire
//! format.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Raw customer/order record as supplied by the caller.
///
/// Every field is optional here; presence of the required ones is checked by
/// the payload builder. Unknown JSON fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitationRecord {
    pub email: Option<String>,
    pub name: Option<String>,
    /// Unique order or transaction reference.
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub sku: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Canonical payload
// ---------------------------------------------------------------------------

/// Validated payload sent to the review platform.
///
/// Serialises as compact JSON with keys in declaration order:
/// `email`, `name`, `ref`, then `sku` and `tags` when present. The optional
/// sequences are skipped entirely when `None`, never written as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalPayload {
    pub email: String,
    pub name: String,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl CanonicalPayload {
    /// Canonical plaintext bytes for encryption.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`]; unreachable for this
    /// type in practice since every field is a string or string list.
    pub fn to_canonical_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
