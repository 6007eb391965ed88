//! Encrypted, authenticated review invitation links.
//!
//! A raw [`InvitationRecord`] goes through [`payload::build`] to become a
//! [`CanonicalPayload`]; a [`LinkEncoder`] then seals it with AES-256-CBC +
//! HMAC-SHA256 and renders the invitation URL.
//!
//! ```no_run
//! use invite_link::{payload, InvitationRecord, LinkConfig, LinkEncoder, TracingSink};
//!
//! # fn main() -> Result<(), invite_link::LinkError> {
//! let record = InvitationRecord {
//!     email: Some("rosie@cotton.com".into()),
//!     name: Some("Rosie Cotton".into()),
//!     reference: Some("ORDER123".into()),
//!     ..Default::default()
//! };
//! let config = LinkConfig::new("<base64 aes key>", "<base64 hmac key>", "acme-shop");
//! let url = LinkEncoder::new(config, TracingSink).encode(&payload::build(record)?)?;
//! println!("{url}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod crypto;
pub mod encoder;
pub mod payload;
pub mod sink;
pub mod telemetry;

pub use common::{CanonicalPayload, InvitationRecord, LinkError};
pub use encoder::{LinkConfig, LinkEncoder, DEFAULT_DOMAIN};
pub use sink::{DiagnosticSink, NoopSink, TracingSink};
