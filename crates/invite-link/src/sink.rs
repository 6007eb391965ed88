//! Diagnostic events emitted by the link encoder.
//!
//! The encoder reports exactly one event per call: [`DiagnosticSink::info`]
//! when a link was produced, [`DiagnosticSink::error`] when it was not.
//! Sinks are injected so tests can capture or discard events without
//! touching the global tracing subscriber.

use std::sync::Arc;

use tracing::{error, info};

/// Receiver for link-generation events.
///
/// Implementations must be safe to share between threads that generate
/// links concurrently.
#[cfg_attr(test, mockall::automock)]
pub trait DiagnosticSink: Send + Sync {
    /// A link was generated for the order `reference`.
    fn info(&self, message: &str, reference: &str, email: &str);

    /// Link generation failed; `reason` is the error's display text.
    fn error(&self, message: &str, reason: &str, reference: &str);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Arc<S> {
    fn info(&self, message: &str, reference: &str, email: &str) {
        (**self).info(message, reference, email)
    }

    fn error(&self, message: &str, reason: &str, reference: &str) {
        (**self).error(message, reason, reference)
    }
}

/// Forwards events to the global `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn info(&self, message: &str, reference: &str, email: &str) {
        info!(reference = %reference, email = %email, "{message}");
    }

    fn error(&self, message: &str, reason: &str, reference: &str) {
        error!(error = %reason, reference = %reference, "{message}");
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn info(&self, _message: &str, _reference: &str, _email: &str) {}

    fn error(&self, _message: &str, _reason: &str, _reference: &str) {}
}
