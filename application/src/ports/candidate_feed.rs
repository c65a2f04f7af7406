//! Candidate feed port
//!
//! The collector's view of the search engine: a continuation stream of
//! not-yet-served candidates for a session.

use crate::use_cases::search_engine::SearchError;
use async_trait::async_trait;
use prospect_domain::{ResultItem, SessionId};

#[async_trait]
pub trait CandidateFeed: Send + Sync {
    /// Up to `count` candidates following the last ones served for the
    /// session. An empty vector means nothing new is available.
    async fn more_candidates(
        &self,
        session_id: &SessionId,
        count: usize,
    ) -> Result<Vec<ResultItem>, SearchError>;
}
