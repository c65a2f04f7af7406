//! Terminal outcomes of a collection job

use serde::{Deserialize, Serialize};

/// Why a collection loop stopped. Every variant is a normal completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionOutcome {
    /// The authoritative accepted count reached the target
    TargetMet,
    /// The search session returned nothing new
    SourceExhausted,
    /// `max_total_pull` candidates were submitted
    CapReached,
    /// The job was cancelled by its owner
    Cancelled,
}

impl CollectionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionOutcome::TargetMet => "target_met",
            CollectionOutcome::SourceExhausted => "source_exhausted",
            CollectionOutcome::CapReached => "cap_reached",
            CollectionOutcome::Cancelled => "cancelled",
        }
    }

    pub fn is_fulfilled(&self) -> bool {
        matches!(self, CollectionOutcome::TargetMet)
    }
}

impl std::fmt::Display for CollectionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of a finished collection job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionReport {
    pub outcome: CollectionOutcome,
    pub target_count: usize,
    /// Authoritative accepted count last observed
    pub accepted_count: usize,
    /// Candidates submitted for qualification
    pub total_consumed: usize,
    pub chunks_submitted: usize,
    /// Candidates pulled from the search session, including the initial page
    pub candidates_fetched: usize,
}
