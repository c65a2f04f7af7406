//! Deficit-driven lead collection
//!
//! Keeps feeding candidates from a search session to an acceptance oracle
//! until the oracle reports enough accepted leads. Acceptance is decided
//! downstream and may lag, so every decision is based on a fresh read of
//! the authoritative count rather than on a local tally.
//!
//! The loop stops in exactly one of these states:
//!
//! | Outcome | Condition |
//! |---------|-----------|
//! | `TargetMet` | accepted count reached the target |
//! | `SourceExhausted` | the session returned nothing new |
//! | `CapReached` | `max_total_pull` candidates submitted |
//! | `Cancelled` | the job's cancellation token fired |

use crate::ports::acceptance_oracle::{AcceptanceOracle, JobContext, OracleError};
use crate::ports::candidate_feed::CandidateFeed;
use crate::ports::collection_progress::CollectionProgress;
use crate::ports::event_logger::{NoEventLogger, SearchEvent, SearchEventLogger};
use crate::use_cases::search_engine::SearchError;
use prospect_domain::{
    CollectionOutcome, CollectionPolicy, CollectionReport, DomainError, ResultItem, SessionId,
};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Errors that abort a collection job
#[derive(Error, Debug)]
pub enum CollectError {
    #[error("Candidate feed failed: {0}")]
    Search(#[from] SearchError),

    #[error("Acceptance oracle failed: {0}")]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    InvalidPolicy(#[from] DomainError),

    #[error("Collection task failed: {0}")]
    Join(String),
}

/// Input for a collection job
#[derive(Debug, Clone)]
pub struct CollectInput {
    pub job: JobContext,
    /// Session the candidates are pulled from
    pub session_id: SessionId,
    /// Page already served to the caller, submitted before any refill
    pub initial_candidates: Vec<ResultItem>,
    pub policy: CollectionPolicy,
}

impl CollectInput {
    pub fn new(job: JobContext, session_id: SessionId, policy: CollectionPolicy) -> Self {
        Self {
            job,
            session_id,
            initial_candidates: Vec::new(),
            policy,
        }
    }

    pub fn with_initial_candidates(mut self, candidates: Vec<ResultItem>) -> Self {
        self.initial_candidates = candidates;
        self
    }
}

/// Runs the deficit-driven collection loop
pub struct DeficitCollector {
    feed: Arc<dyn CandidateFeed>,
    oracle: Arc<dyn AcceptanceOracle>,
    events: Arc<dyn SearchEventLogger>,
}

impl DeficitCollector {
    pub fn new(feed: Arc<dyn CandidateFeed>, oracle: Arc<dyn AcceptanceOracle>) -> Self {
        Self {
            feed,
            oracle,
            events: Arc::new(NoEventLogger),
        }
    }

    pub fn with_event_logger(mut self, events: Arc<dyn SearchEventLogger>) -> Self {
        self.events = events;
        self
    }

    /// Run the loop to a terminal outcome on the current task.
    pub async fn collect_until_fulfilled(
        &self,
        input: CollectInput,
        progress: &dyn CollectionProgress,
    ) -> Result<CollectionReport, CollectError> {
        self.collect_with_cancellation(input, progress, &CancellationToken::new())
            .await
    }

    /// Run the loop, stopping with `Cancelled` once `cancel` fires.
    ///
    /// Cancellation is checked between iterations; a chunk already handed
    /// to the oracle is never withdrawn.
    pub async fn collect_with_cancellation(
        &self,
        input: CollectInput,
        progress: &dyn CollectionProgress,
        cancel: &CancellationToken,
    ) -> Result<CollectionReport, CollectError> {
        input.policy.validate()?;
        let CollectInput {
            job,
            session_id,
            initial_candidates,
            policy,
        } = input;

        let mut report = CollectionReport {
            outcome: CollectionOutcome::TargetMet,
            target_count: policy.target_count,
            accepted_count: 0,
            total_consumed: 0,
            chunks_submitted: 0,
            candidates_fetched: initial_candidates.len(),
        };
        let mut buffer: VecDeque<String> = candidate_links(initial_candidates).collect();
        let mut started = false;

        info!(
            job_id = %job.job_id,
            session_id = %session_id,
            target = policy.target_count,
            initial = buffer.len(),
            "Starting collection"
        );

        report.outcome = loop {
            if cancel.is_cancelled() {
                break CollectionOutcome::Cancelled;
            }

            let accepted = self.oracle.accepted_count(&job.job_id).await?;
            report.accepted_count = accepted;
            if !started {
                progress.on_start(policy.target_count, accepted);
                started = true;
            }
            let deficit = policy.deficit(accepted);
            if deficit == 0 {
                break CollectionOutcome::TargetMet;
            }

            if buffer.is_empty() {
                let requested = policy.refill_size(deficit);
                let fresh = self.feed.more_candidates(&session_id, requested).await?;
                progress.on_refill(requested, fresh.len());
                debug!(job_id = %job.job_id, requested, received = fresh.len(), "Refilled candidates");
                report.candidates_fetched += fresh.len();
                buffer.extend(candidate_links(fresh));
                if buffer.is_empty() {
                    break CollectionOutcome::SourceExhausted;
                }
            }

            // Acceptance from earlier chunks may have landed meanwhile
            let pre_count = self.oracle.accepted_count(&job.job_id).await?;
            report.accepted_count = pre_count;
            let deficit = policy.deficit(pre_count);
            if deficit == 0 {
                break CollectionOutcome::TargetMet;
            }

            let size = policy
                .chunk_size(deficit, report.total_consumed)
                .min(buffer.len());
            if size == 0 {
                break CollectionOutcome::CapReached;
            }
            let chunk: Vec<String> = buffer.drain(..size).collect();
            self.oracle.submit_candidates(&chunk, &job).await?;
            report.total_consumed += chunk.len();
            report.chunks_submitted += 1;

            let post_count = self.oracle.accepted_count(&job.job_id).await?;
            report.accepted_count = post_count;
            let accepted_in_chunk = post_count.saturating_sub(pre_count);
            progress.on_chunk_submitted(chunk.len(), accepted_in_chunk, post_count);

            info!(
                job_id = %job.job_id,
                chunk = chunk.len(),
                accepted_in_chunk,
                accepted = post_count,
                consumed = report.total_consumed,
                deficit = policy.deficit(post_count),
                "Chunk done"
            );
            self.events.log(SearchEvent::new(
                "chunk_done",
                json!({
                    "job_id": job.job_id,
                    "session_id": session_id.as_str(),
                    "chunk_urls": chunk,
                    "pre_count": pre_count,
                    "post_count": post_count,
                    "accepted_in_chunk": accepted_in_chunk,
                    "collected": post_count,
                    "total_consumed": report.total_consumed,
                }),
            ));

            if report.total_consumed >= policy.max_total_pull {
                break CollectionOutcome::CapReached;
            }
        };

        info!(
            job_id = %job.job_id,
            outcome = %report.outcome,
            accepted = report.accepted_count,
            consumed = report.total_consumed,
            "Collection finished"
        );
        progress.on_finished(&report);
        Ok(report)
    }

    /// Run the loop as a background task that outlives the caller.
    pub fn spawn(
        self: Arc<Self>,
        input: CollectInput,
        progress: Arc<dyn CollectionProgress>,
    ) -> CollectionJob {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let job_id = input.job.job_id.clone();

        let handle = tokio::spawn(async move {
            self.collect_with_cancellation(input, progress.as_ref(), &token)
                .await
        });

        CollectionJob {
            job_id,
            handle,
            cancel,
        }
    }
}

/// Handle to a collection loop running on its own task
pub struct CollectionJob {
    job_id: String,
    handle: JoinHandle<Result<CollectionReport, CollectError>>,
    cancel: CancellationToken,
}

impl CollectionJob {
    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Ask the loop to stop before its next iteration
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the terminal report
    pub async fn wait(self) -> Result<CollectionReport, CollectError> {
        self.handle
            .await
            .map_err(|e| CollectError::Join(e.to_string()))?
    }
}

fn candidate_links(items: Vec<ResultItem>) -> impl Iterator<Item = String> {
    items
        .into_iter()
        .map(|item| item.link)
        .filter(|link| !link.is_empty())
}
