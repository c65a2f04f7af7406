//! Logging infrastructure: structured search event logging.
//!
//! Provides [`JsonlEventLogger`], a JSONL file writer that implements
//! the [`SearchEventLogger`](prospect_application::SearchEventLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlEventLogger;
