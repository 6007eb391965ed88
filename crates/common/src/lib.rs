//! Common types, payload definitions, and errors shared across `invite-link` crates.

pub mod error;
pub mod protocol;

pub use error::LinkError;
pub use protocol::{CanonicalPayload, InvitationRecord};
