//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into engine parameters and
//! collection policies by the CLI.

mod collector;
mod logging;
mod planner;
mod search;

pub use collector::FileCollectorConfig;
pub use logging::FileLoggingConfig;
pub use planner::{FilePlannerConfig, PlannerKind};
pub use search::FileSearchConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("{section}.timeout_seconds cannot be 0")]
    InvalidTimeout { section: &'static str },

    #[error("collector.max_chunk_size cannot be 0")]
    InvalidChunkSize,

    #[error("collector.max_total_pull cannot be 0")]
    InvalidMaxTotalPull,

    #[error("collector.overfetch_factor must be positive, got {0}")]
    InvalidOverfetchFactor(f64),

    #[error("planner.max_queries cannot be 0")]
    InvalidMaxQueries,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Search source and growth settings
    pub search: FileSearchConfig,
    /// Query planner settings
    pub planner: FilePlannerConfig,
    /// Deficit collector sizing
    pub collector: FileCollectorConfig,
    /// Structured event log
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.search.timeout_seconds == 0 {
            issues.push(ConfigValidationError::InvalidTimeout { section: "search" });
        }
        if self.planner.timeout_seconds == 0 {
            issues.push(ConfigValidationError::InvalidTimeout { section: "planner" });
        }
        if self.planner.max_queries == 0 {
            issues.push(ConfigValidationError::InvalidMaxQueries);
        }
        if self.collector.max_chunk_size == 0 {
            issues.push(ConfigValidationError::InvalidChunkSize);
        }
        if self.collector.max_total_pull == 0 {
            issues.push(ConfigValidationError::InvalidMaxTotalPull);
        }
        let factor = self.collector.overfetch_factor;
        if !(factor.is_finite() && factor > 0.0) {
            issues.push(ConfigValidationError::InvalidOverfetchFactor(factor));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[search]
api_key = "g-key"
engine_id = "cx-1"
timeout_seconds = 20
headroom = 5
diversify_once = false
excluded_sites = ["yelp."]

[planner]
kind = "llm"
model = "gpt-4o-mini"
diversify_model = "gpt-4o"
contact_focus = "phone"

[collector]
overfetch_factor = 3.0
max_total_pull = 50
max_chunk_size = 5

[logging]
events_file = "/tmp/prospect-events.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.search.api_key.as_deref(), Some("g-key"));
        assert_eq!(config.search.timeout_seconds, 20);
        assert_eq!(config.search.excluded_sites, vec!["yelp.".to_string()]);
        assert_eq!(config.planner.diversify_model.as_deref(), Some("gpt-4o"));
        assert_eq!(config.collector.max_chunk_size, 5);
        assert_eq!(
            config.logging.events_file.as_deref(),
            Some("/tmp/prospect-events.jsonl")
        );

        let params = config.search.to_engine_params();
        assert_eq!(params.headroom, 5);
        assert!(!params.diversify_once);

        let policy = config.collector.to_policy(12);
        assert_eq!(policy.target_count, 12);
        assert_eq!(policy.overfetch_factor, 3.0);
        assert_eq!(policy.max_total_pull, 50);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[collector]
max_chunk_size = 4
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.collector.max_chunk_size, 4);
        // Defaults should apply
        assert_eq!(config.collector.max_total_pull, 200);
        assert_eq!(config.search.timeout_seconds, 12);
        assert_eq!(config.search.excluded_sites.len(), 14);
        assert_eq!(config.planner.kind, PlannerKind::Llm);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let mut config = FileConfig::default();
        config.search.timeout_seconds = 0;
        config.collector.max_chunk_size = 0;
        config.collector.overfetch_factor = -1.0;
        config.planner.max_queries = 0;

        let issues = config.validate();
        assert_eq!(issues.len(), 4);
        assert!(issues.contains(&ConfigValidationError::InvalidTimeout { section: "search" }));
        assert!(issues.contains(&ConfigValidationError::InvalidChunkSize));
        assert!(issues.contains(&ConfigValidationError::InvalidMaxQueries));
    }
}
