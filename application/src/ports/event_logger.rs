//! Port for structured search event logging.
//!
//! Separate from `tracing`-based diagnostics: this port records
//! machine-readable growth and collection summaries (one record per event)
//! for offline analysis of source spend and acceptance rates.

use serde_json::Value;

/// A structured search event.
pub struct SearchEvent {
    /// Event type identifier (e.g., "growth_summary", "chunk_done").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl SearchEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging search events to a structured log.
///
/// `log` is synchronous and non-fallible; write failures are the
/// adapter's concern and never interrupt a search.
pub trait SearchEventLogger: Send + Sync {
    fn log(&self, event: SearchEvent);
}

/// No-op implementation for tests and when event logging is disabled.
pub struct NoEventLogger;

impl SearchEventLogger for NoEventLogger {
    fn log(&self, _event: SearchEvent) {}
}
