//! Query planner port
//!
//! Turns a free-form prompt into the search queries a session is grown from.

use async_trait::async_trait;
use prospect_domain::PlanningHints;
use thiserror::Error;

/// Errors that can occur while planning queries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("Planner request failed: {0}")]
    Request(String),

    #[error("Invalid planner response: {0}")]
    InvalidResponse(String),

    #[error("Planner not configured: {0}")]
    NotConfigured(String),
}

/// Produces ordered, distinct query strings for a prompt.
///
/// An empty list is a valid answer; the session then stays empty.
#[async_trait]
pub trait QueryPlanner: Send + Sync {
    /// Initial queries for a new session
    async fn plan(&self, prompt: &str, hints: &PlanningHints) -> Result<Vec<String>, PlannerError>;

    /// Broader replacement queries, used when the initial set found nothing
    async fn diversify(
        &self,
        prompt: &str,
        hints: &PlanningHints,
    ) -> Result<Vec<String>, PlannerError>;
}
