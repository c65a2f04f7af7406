//! Application layer for prospect-search
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::EngineParams;
pub use ports::{
    acceptance_oracle::{AcceptanceOracle, JobContext, OracleError},
    candidate_feed::CandidateFeed,
    collection_progress::{CollectionProgress, NoCollectionProgress},
    event_logger::{NoEventLogger, SearchEvent, SearchEventLogger},
    query_planner::{PlannerError, QueryPlanner},
    search_source::{SearchSource, SourceError, SourceRequest},
    session_store::{InMemorySessionStore, SessionHandle, SessionStore},
};
pub use use_cases::collect_leads::{CollectError, CollectInput, CollectionJob, DeficitCollector};
pub use use_cases::search_engine::{GrowthPass, SearchEngine, SearchError};
