//! Port for structured invocation logging.
//!
//! Defines the [`InvocationLogger`] trait for recording one record per tool
//! dispatch (tool, outcome, duration) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures an audit
//! trail in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured invocation event for logging.
pub struct InvocationEvent {
    /// Event type identifier (e.g., "tool_completed", "tool_failed", "filler_sent").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl InvocationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging invocation events to a structured log.
///
/// The `log` method is synchronous and non-fallible so it never disrupts a
/// dispatch; write failures are ignored.
pub trait InvocationLogger: Send + Sync {
    /// Record an invocation event.
    fn log(&self, event: InvocationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoInvocationLogger;

impl InvocationLogger for NoInvocationLogger {
    fn log(&self, _event: InvocationEvent) {}
}
