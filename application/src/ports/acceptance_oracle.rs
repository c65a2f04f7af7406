//! Acceptance oracle port
//!
//! The oracle is the single source of truth for how many leads a job has
//! accepted. Qualification happens downstream (extraction, validation,
//! de-duplication against stored leads) and may lag behind submission, so
//! the collector re-reads the count instead of tracking its own.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when talking to the acceptance oracle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("Unknown job: {0}")]
    UnknownJob(String),

    #[error("Acceptance store unavailable: {0}")]
    Unavailable(String),

    #[error("Candidate submission failed: {0}")]
    SubmissionFailed(String),
}

/// Context forwarded with every candidate submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobContext {
    pub job_id: String,
    pub caller_id: String,
    /// Optional region restrictions applied by the qualification step
    #[serde(default)]
    pub region_filters: Vec<String>,
}

impl JobContext {
    pub fn new(job_id: impl Into<String>, caller_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            caller_id: caller_id.into(),
            region_filters: Vec::new(),
        }
    }

    pub fn with_region_filters(mut self, filters: Vec<String>) -> Self {
        self.region_filters = filters;
        self
    }
}

/// External authority deciding which candidates count toward a target
#[async_trait]
pub trait AcceptanceOracle: Send + Sync {
    /// Authoritative accepted count for `job_id` (may lag submissions)
    async fn accepted_count(&self, job_id: &str) -> Result<usize, OracleError>;

    /// Hand candidate URLs to qualification
    async fn submit_candidates(&self, urls: &[String], job: &JobContext) -> Result<(), OracleError>;
}
