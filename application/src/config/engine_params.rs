//! Engine parameters: growth and fallback control.
//!
//! [`EngineParams`] groups the static knobs of
//! [`SearchEngine`](crate::use_cases::search_engine::SearchEngine).
//! Source hard limits live in the domain as constants; these may only
//! tighten them.

use prospect_domain::{MAX_PAGE_SIZE, MAX_QUERY_OFFSET};
use serde::{Deserialize, Serialize};

/// Growth and fallback parameters for the search engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineParams {
    /// Extra items fetched beyond what a request needs.
    pub headroom: usize,
    /// Items requested per source call (clamped to `MAX_PAGE_SIZE`).
    pub page_size: usize,
    /// Deepest upstream offset per query (clamped to `MAX_QUERY_OFFSET`).
    pub max_query_offset: usize,
    /// Ask the planner for broader queries at most once per session.
    pub diversify_once: bool,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            headroom: 10,
            page_size: MAX_PAGE_SIZE,
            max_query_offset: MAX_QUERY_OFFSET,
            diversify_once: true,
        }
    }
}

impl EngineParams {
    // ==================== Builder Methods ====================

    pub fn with_headroom(mut self, headroom: usize) -> Self {
        self.headroom = headroom;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_max_query_offset(mut self, max: usize) -> Self {
        self.max_query_offset = max;
        self
    }

    pub fn with_diversify_once(mut self, once: bool) -> Self {
        self.diversify_once = once;
        self
    }

    // ==================== Effective Limits ====================

    pub fn effective_page_size(&self) -> usize {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    pub fn effective_query_offset(&self) -> usize {
        self.max_query_offset.min(MAX_QUERY_OFFSET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = EngineParams::default();
        assert_eq!(params.headroom, 10);
        assert_eq!(params.effective_page_size(), 10);
        assert_eq!(params.effective_query_offset(), 100);
        assert!(params.diversify_once);
    }

    #[test]
    fn test_limits_cannot_exceed_source_caps() {
        let params = EngineParams::default()
            .with_page_size(50)
            .with_max_query_offset(500);
        assert_eq!(params.effective_page_size(), MAX_PAGE_SIZE);
        assert_eq!(params.effective_query_offset(), MAX_QUERY_OFFSET);
        assert_eq!(EngineParams::default().with_page_size(0).effective_page_size(), 1);
    }
}
