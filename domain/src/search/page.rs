//! Page shapes handed back by the pagination operations

use super::value_objects::{ResultItem, SessionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pagination metadata for one served slice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub offset: usize,
    pub results_returned: usize,
    pub total_results_available: usize,
    /// More items exist past this slice, or the session may still grow
    pub has_more: bool,
    /// `None` once `has_more` is false
    pub next_offset: Option<usize>,
}

/// Observability snapshot of the session a page was served from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: SessionId,
    pub total_results: usize,
    pub total_results_served: usize,
    pub total_source_calls: u64,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
    pub is_exhausted: bool,
    pub diversified: bool,
}

/// The queries behind a session and how far each has been paginated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryInfo {
    pub original_prompt: String,
    pub generated_queries: Vec<String>,
    pub query_positions: BTreeMap<String, usize>,
}

/// Result of `search_with_offset` / `get_more_results`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    pub results: Vec<ResultItem>,
    pub pagination: Pagination,
    pub session_info: SessionInfo,
    pub query_info: QueryInfo,
}

impl PageResult {
    pub fn session_id(&self) -> &SessionId {
        &self.session_info.session_id
    }

    pub fn links(&self) -> Vec<String> {
        self.results.iter().map(|r| r.link.clone()).collect()
    }
}
