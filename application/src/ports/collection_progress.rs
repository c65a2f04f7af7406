//! Collection progress port
//!
//! Defines the interface for reporting progress of a collection job.

use prospect_domain::CollectionReport;

/// Callback for progress updates during collection
///
/// Implementations live in the presentation layer.
pub trait CollectionProgress: Send + Sync {
    /// Called when the job starts, with the authoritative count observed
    fn on_start(&self, _target_count: usize, _accepted_count: usize) {}

    /// Called after the candidate buffer was refilled from the search session
    fn on_refill(&self, requested: usize, received: usize);

    /// Called after a chunk was submitted and the count re-read
    fn on_chunk_submitted(&self, chunk_len: usize, accepted_in_chunk: usize, accepted_count: usize);

    /// Called once the loop reached a terminal outcome
    fn on_finished(&self, report: &CollectionReport);
}

/// No-op progress for when reporting is not needed
pub struct NoCollectionProgress;

impl CollectionProgress for NoCollectionProgress {
    fn on_refill(&self, _requested: usize, _received: usize) {}
    fn on_chunk_submitted(&self, _chunk_len: usize, _accepted_in_chunk: usize, _accepted_count: usize) {}
    fn on_finished(&self, _report: &CollectionReport) {}
}
