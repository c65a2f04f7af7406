//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod acceptance_oracle;
pub mod candidate_feed;
pub mod collection_progress;
pub mod event_logger;
pub mod query_planner;
pub mod search_source;
pub mod session_store;
