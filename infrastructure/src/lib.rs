//! Infrastructure layer for prospect-search
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod oracle;
pub mod planner;
pub mod search;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileCollectorConfig, FileConfig, FileLoggingConfig,
    FilePlannerConfig, FileSearchConfig, PlannerKind,
};
pub use logging::JsonlEventLogger;
pub use oracle::InMemoryAcceptanceLedger;
pub use planner::{LlmQueryPlanner, TemplateQueryPlanner};
pub use search::GoogleCseClient;
