//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod collect_leads;
pub mod search_engine;
