//! Domain layer for prospect-search
//!
//! This crate contains the core entities, value objects and policies.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Search Session
//!
//! A session is the merged, append-only result buffer for one
//! (caller, prompt, day) key. Several queries feed it; items are
//! deduplicated by link and served through stable offsets.
//!
//! ## Deficit-Driven Collection
//!
//! A collection job keeps pulling candidates from a session until an
//! external authority reports enough accepted leads, the session runs dry,
//! or a hard pull cap is hit. [`CollectionPolicy`] sizes every pull.

pub mod collection;
pub mod core;
pub mod planning;
pub mod search;

// Re-export commonly used types
pub use collection::{
    outcome::{CollectionOutcome, CollectionReport},
    policy::CollectionPolicy,
};
pub use core::{error::DomainError, prompt::Prompt};
pub use planning::{
    hints::PlanningHints, location::extract_locations, query_list::parse_query_list,
};
pub use search::{
    entities::SearchSession,
    page::{PageResult, Pagination, QueryInfo, SessionInfo},
    value_objects::{MAX_PAGE_SIZE, MAX_QUERY_OFFSET, ResultItem, SessionId},
};
