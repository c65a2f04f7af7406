//! Collector configuration from TOML (`[collector]` section)

use prospect_domain::CollectionPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCollectorConfig {
    /// Multiplier applied to the deficit when sizing pulls
    pub overfetch_factor: f64,
    /// Hard cap on candidates submitted per job
    pub max_total_pull: usize,
    /// Largest single submission
    pub max_chunk_size: usize,
}

impl Default for FileCollectorConfig {
    fn default() -> Self {
        Self {
            overfetch_factor: CollectionPolicy::DEFAULT_OVERFETCH_FACTOR,
            max_total_pull: CollectionPolicy::DEFAULT_MAX_TOTAL_PULL,
            max_chunk_size: CollectionPolicy::DEFAULT_MAX_CHUNK_SIZE,
        }
    }
}

impl FileCollectorConfig {
    pub fn to_policy(&self, target_count: usize) -> CollectionPolicy {
        CollectionPolicy::new(target_count)
            .with_overfetch_factor(self.overfetch_factor)
            .with_max_total_pull(self.max_total_pull)
            .with_max_chunk_size(self.max_chunk_size)
    }
}
