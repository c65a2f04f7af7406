//! Search aggregation use case
//!
//! Fans a prompt out into several planner queries, grows one merged,
//! deduplicated session from a paginated source, and serves it through
//! stable offsets.
//!
//! # Growth
//!
//! A growth pass walks the session's queries once, in order. Each query
//! with remaining capacity is asked for `min(page_size, needed)` items at
//! its cursor; the batch is deduplicated against the whole session before
//! it is appended and the cursor advances by the raw batch size. A pass
//! that adds nothing (and saw no failures) marks the session exhausted.
//! One pass costs at most `queries.len()` source calls; the public
//! operations decide whether another pass is needed.
//!
//! Session state is updated right after each page returns, so a request
//! dropped mid-pass keeps every page merged so far.

use crate::config::EngineParams;
use crate::ports::candidate_feed::CandidateFeed;
use crate::ports::event_logger::{NoEventLogger, SearchEvent, SearchEventLogger};
use crate::ports::query_planner::{PlannerError, QueryPlanner};
use crate::ports::search_source::{SearchSource, SourceError, SourceRequest};
use crate::ports::session_store::SessionStore;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use prospect_domain::{
    DomainError, PageResult, PlanningHints, Prompt, ResultItem, SearchSession, SessionId,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced by the pagination operations
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Search source error: {0}")]
    Source(#[from] SourceError),

    #[error("Query planning failed: {0}")]
    Planner(#[from] PlannerError),

    #[error("Session not found or expired: {0}")]
    SessionNotFound(SessionId),

    #[error(transparent)]
    InvalidRequest(#[from] DomainError),
}

impl SearchError {
    /// Errors the caller should not retry unchanged
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SearchError::SessionNotFound(_) | SearchError::InvalidRequest(_)
        )
    }
}

/// Tally of one growth pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrowthPass {
    /// Source calls issued
    pub attempted: usize,
    /// Source calls that failed
    pub failed: usize,
    /// Raw items returned by the source
    pub fetched: usize,
    /// Items appended after deduplication
    pub added: usize,
    /// Whether this pass marked the session exhausted
    pub exhausted: bool,
}

/// Search aggregation engine
pub struct SearchEngine {
    planner: Arc<dyn QueryPlanner>,
    source: Arc<dyn SearchSource>,
    store: Arc<dyn SessionStore>,
    params: EngineParams,
    events: Arc<dyn SearchEventLogger>,
}

impl SearchEngine {
    pub fn new(
        planner: Arc<dyn QueryPlanner>,
        source: Arc<dyn SearchSource>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            planner,
            source,
            store,
            params: EngineParams::default(),
            events: Arc::new(NoEventLogger),
        }
    }

    pub fn with_params(mut self, params: EngineParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_event_logger(mut self, events: Arc<dyn SearchEventLogger>) -> Self {
        self.events = events;
        self
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Serve `count` items starting at `offset` for a caller's prompt.
    ///
    /// The session is keyed by (caller, prompt, today) and created lazily.
    pub async fn search_with_offset(
        &self,
        prompt: &str,
        caller_id: &str,
        offset: usize,
        count: usize,
    ) -> Result<PageResult, SearchError> {
        self.search_with_offset_on(prompt, caller_id, offset, count, Utc::now().date_naive())
            .await
    }

    /// [`search_with_offset`](Self::search_with_offset) with an explicit
    /// session day.
    pub async fn search_with_offset_on(
        &self,
        prompt: &str,
        caller_id: &str,
        offset: usize,
        count: usize,
        day: NaiveDate,
    ) -> Result<PageResult, SearchError> {
        let prompt = Prompt::try_new(prompt)?;
        validate_count(count)?;

        let session_id = SessionId::derive(caller_id, prompt.content(), day);
        let hints = PlanningHints::from_prompt(prompt.content());
        let (handle, created) = self.store.get_or_insert(SearchSession::new(
            session_id.clone(),
            prompt.content(),
            hints,
        ));
        if created {
            info!(session_id = %session_id, "Created search session");
        }

        let mut session = handle.lock().await;
        let required = offset.saturating_add(count);
        let target = required.saturating_add(self.params.headroom);

        if !session.is_planned() {
            self.plan_session(&mut session).await?;
            self.fetch_more_results(&mut session, target).await?;
        }
        self.diversify_if_empty(&mut session, target).await?;

        if session.needs_more(required) {
            self.fetch_more_results(&mut session, target).await?;
        }

        Ok(session.page(offset, count))
    }

    /// Serve the next `count` items after the last ones handed out for
    /// `session_id`.
    pub async fn get_more_results(
        &self,
        session_id: &SessionId,
        count: usize,
    ) -> Result<PageResult, SearchError> {
        validate_count(count)?;

        let handle = self
            .store
            .get(session_id)
            .ok_or_else(|| SearchError::SessionNotFound(session_id.clone()))?;
        let mut session = handle.lock().await;

        let offset = session.last_returned_offset();
        let required = offset.saturating_add(count);
        if session.needs_more(required) {
            self.fetch_more_results(&mut session, required.saturating_add(self.params.headroom))
                .await?;
        }

        Ok(session.page(offset, count))
    }

    /// Run one growth pass toward `target_count` items.
    ///
    /// A failing query is skipped as long as another query in the same
    /// pass answered; if every call in the pass failed, the last error is
    /// returned.
    pub async fn fetch_more_results(
        &self,
        session: &mut SearchSession,
        target_count: usize,
    ) -> Result<GrowthPass, SearchError> {
        let mut pass = GrowthPass::default();
        let before = session.len();
        if before >= target_count || session.is_exhausted() {
            return Ok(pass);
        }

        let page_size = self.params.effective_page_size();
        let offset_cap = self.params.effective_query_offset();
        let hints = session.hints().clone();
        let queries = session.queries().to_vec();
        let mut needed = target_count - before;
        let mut last_error: Option<SourceError> = None;

        for query in &queries {
            if needed == 0 {
                break;
            }

            let cursor = session.cursor(query);
            if cursor >= offset_cap {
                continue;
            }

            let request = SourceRequest {
                query,
                start: cursor + 1,
                page_size: page_size.min(needed).min(offset_cap - cursor),
                hints: &hints,
            };
            pass.attempted += 1;

            match self.source.fetch(&request).await {
                Ok(mut batch) => {
                    batch.truncate(request.page_size);
                    let fetched = batch.len();
                    let added = session.merge_batch(query, batch);
                    debug!(
                        session_id = %session.id(),
                        query = %query,
                        start = request.start,
                        fetched,
                        added,
                        "Merged source page"
                    );
                    pass.fetched += fetched;
                    pass.added += added;
                    needed = needed.saturating_sub(added);
                }
                Err(e) => {
                    warn!(
                        session_id = %session.id(),
                        query = %query,
                        start = request.start,
                        error = %e,
                        "Source page failed, continuing with remaining queries"
                    );
                    pass.failed += 1;
                    last_error = Some(e);
                }
            }
        }

        if pass.failed > 0
            && pass.failed == pass.attempted
            && let Some(e) = last_error
        {
            return Err(e.into());
        }

        if pass.added == 0 && pass.failed == 0 {
            session.mark_exhausted();
            pass.exhausted = true;
        }

        info!(
            session_id = %session.id(),
            target = target_count,
            held = session.len(),
            added = pass.added,
            calls = pass.attempted,
            failed = pass.failed,
            exhausted = session.is_exhausted(),
            "Growth pass complete"
        );
        self.events.log(SearchEvent::new(
            "growth_summary",
            json!({
                "session_id": session.id().as_str(),
                "requested": target_count,
                "returned": session.len(),
                "added": pass.added,
                "overfetched_items": session.len().saturating_sub(target_count),
                "queries_used": session.queries(),
                "locations_used": session.hints().locations,
                "source_calls": pass.attempted,
                "failed_calls": pass.failed,
                "exhausted": session.is_exhausted(),
            }),
        ));

        Ok(pass)
    }

    async fn plan_session(&self, session: &mut SearchSession) -> Result<(), SearchError> {
        let queries = self
            .planner
            .plan(session.original_prompt(), session.hints())
            .await?;
        info!(session_id = %session.id(), queries = ?queries, "Planned session queries");
        session.install_queries(queries);
        Ok(())
    }

    /// Swap in broader queries when the current set found nothing at all.
    ///
    /// Runs after a growth pass that did not fail outright, so a pass with
    /// one throttled query and empty answers elsewhere still counts.
    async fn diversify_if_empty(
        &self,
        session: &mut SearchSession,
        target_count: usize,
    ) -> Result<(), SearchError> {
        if !session.is_empty() {
            return Ok(());
        }
        if self.params.diversify_once && session.is_diversified() {
            return Ok(());
        }

        let queries = self
            .planner
            .diversify(session.original_prompt(), session.hints())
            .await?;
        info!(
            session_id = %session.id(),
            queries = ?queries,
            "Initial queries found nothing, switching to diversified queries"
        );
        session.replace_queries(queries);
        self.fetch_more_results(session, target_count).await?;
        Ok(())
    }
}

#[async_trait]
impl CandidateFeed for SearchEngine {
    async fn more_candidates(
        &self,
        session_id: &SessionId,
        count: usize,
    ) -> Result<Vec<ResultItem>, SearchError> {
        Ok(self.get_more_results(session_id, count).await?.results)
    }
}

fn validate_count(count: usize) -> Result<(), DomainError> {
    if count == 0 {
        return Err(DomainError::InvalidPageRequest(
            "count must be greater than 0".to_string(),
        ));
    }
    Ok(())
}
