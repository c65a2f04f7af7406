//! Collection policy: quota and pull sizing for the deficit-driven loop

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Quota and sizing rules for one collection job.
///
/// Acceptance downstream is lossy, so every pull is scaled by
/// `overfetch_factor`. `max_chunk_size` bounds a single submission and
/// `max_total_pull` bounds the candidates a job may ever submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionPolicy {
    /// Accepted leads the job must reach
    pub target_count: usize,
    pub overfetch_factor: f64,
    pub max_total_pull: usize,
    pub max_chunk_size: usize,
}

impl CollectionPolicy {
    pub const DEFAULT_OVERFETCH_FACTOR: f64 = 2.0;
    pub const DEFAULT_MAX_TOTAL_PULL: usize = 200;
    pub const DEFAULT_MAX_CHUNK_SIZE: usize = 10;

    /// Smallest refill requested from the search engine
    pub const MIN_REFILL: usize = 10;

    pub fn new(target_count: usize) -> Self {
        Self {
            target_count,
            overfetch_factor: Self::DEFAULT_OVERFETCH_FACTOR,
            max_total_pull: Self::DEFAULT_MAX_TOTAL_PULL,
            max_chunk_size: Self::DEFAULT_MAX_CHUNK_SIZE,
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_overfetch_factor(mut self, factor: f64) -> Self {
        self.overfetch_factor = factor;
        self
    }

    pub fn with_max_total_pull(mut self, max: usize) -> Self {
        self.max_total_pull = max;
        self
    }

    pub fn with_max_chunk_size(mut self, max: usize) -> Self {
        self.max_chunk_size = max;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !(self.overfetch_factor.is_finite() && self.overfetch_factor > 0.0) {
            return Err(DomainError::InvalidPolicy(format!(
                "overfetch_factor must be positive, got {}",
                self.overfetch_factor
            )));
        }
        if self.max_chunk_size == 0 {
            return Err(DomainError::InvalidPolicy(
                "max_chunk_size cannot be 0".to_string(),
            ));
        }
        if self.max_total_pull == 0 {
            return Err(DomainError::InvalidPolicy(
                "max_total_pull cannot be 0".to_string(),
            ));
        }
        Ok(())
    }

    // ==================== Sizing ====================

    /// Shortfall against the authoritative accepted count
    pub fn deficit(&self, accepted_count: usize) -> usize {
        self.target_count.saturating_sub(accepted_count)
    }

    /// How many candidates to request when the buffer runs dry
    pub fn refill_size(&self, deficit: usize) -> usize {
        (self.max_chunk_size * 2).min(self.overfetched(deficit).max(Self::MIN_REFILL))
    }

    /// How many candidates to submit next, never crossing `max_total_pull`
    pub fn chunk_size(&self, deficit: usize, consumed: usize) -> usize {
        let remaining = self.max_total_pull.saturating_sub(consumed);
        self.max_chunk_size
            .min(self.overfetched(deficit).max(1))
            .min(remaining)
    }

    fn overfetched(&self, deficit: usize) -> usize {
        (deficit as f64 * self.overfetch_factor) as usize
    }
}

impl Default for CollectionPolicy {
    fn default() -> Self {
        Self::new(0)
    }
}
