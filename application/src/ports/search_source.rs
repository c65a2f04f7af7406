//! Search source port
//!
//! Defines the interface to the paginated external search index.

use async_trait::async_trait;
use prospect_domain::{PlanningHints, ResultItem};
use thiserror::Error;

/// Errors raised by a search source.
///
/// An empty result set is not an error: sources return `Ok(vec![])`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Search provider throttled the request (HTTP {status})")]
    Throttled { status: u16 },

    #[error("Search service error (HTTP {status})")]
    Http { status: u16 },

    #[error("Search request timed out")]
    Timeout,

    #[error("Search service unavailable: {0}")]
    Transport(String),

    #[error("Invalid search response: {0}")]
    InvalidResponse(String),

    #[error("Search source not configured: {0}")]
    NotConfigured(String),
}

impl SourceError {
    /// Quota or rate-limit refusals (HTTP 403/429)
    pub fn is_throttled(&self) -> bool {
        matches!(self, SourceError::Throttled { .. })
    }
}

/// One page request against the source
#[derive(Debug, Clone, Copy)]
pub struct SourceRequest<'a> {
    pub query: &'a str,
    /// 1-based offset of the first item to return
    pub start: usize,
    /// Items wanted, at most [`MAX_PAGE_SIZE`](prospect_domain::MAX_PAGE_SIZE)
    pub page_size: usize,
    pub hints: &'a PlanningHints,
}

/// Paginated, rate-limited external search index
#[async_trait]
pub trait SearchSource: Send + Sync {
    /// Fetch one page of ranked items for `request.query`
    async fn fetch(&self, request: &SourceRequest<'_>) -> Result<Vec<ResultItem>, SourceError>;
}
