//! In-process acceptance ledger.
//!
//! Stands in for a persisted job record when collection runs locally. A
//! candidate is accepted when it is a valid http(s) URL whose host has not
//! been accepted for the same job before, which mirrors the one-lead-per-
//! company rule of the downstream qualification step.

use async_trait::async_trait;
use prospect_application::ports::acceptance_oracle::{AcceptanceOracle, JobContext, OracleError};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tracing::debug;

#[derive(Debug, Default)]
struct JobLedger {
    accepted_hosts: HashSet<String>,
    accepted_urls: Vec<String>,
    submitted: usize,
}

/// Acceptance oracle keeping its counts in memory.
#[derive(Debug, Default)]
pub struct InMemoryAcceptanceLedger {
    jobs: Mutex<HashMap<String, JobLedger>>,
}

impl InMemoryAcceptanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a ledger for `job_id`. Registering twice keeps the existing one.
    pub fn register(&self, job_id: impl Into<String>) {
        self.jobs().entry(job_id.into()).or_default();
    }

    /// Accepted URLs for a job, in acceptance order
    pub fn accepted_urls(&self, job_id: &str) -> Vec<String> {
        self.jobs()
            .get(job_id)
            .map(|ledger| ledger.accepted_urls.clone())
            .unwrap_or_default()
    }

    /// Candidates submitted for a job, accepted or not
    pub fn submitted_count(&self, job_id: &str) -> usize {
        self.jobs().get(job_id).map_or(0, |ledger| ledger.submitted)
    }

    fn jobs(&self) -> std::sync::MutexGuard<'_, HashMap<String, JobLedger>> {
        self.jobs.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl AcceptanceOracle for InMemoryAcceptanceLedger {
    async fn accepted_count(&self, job_id: &str) -> Result<usize, OracleError> {
        self.jobs()
            .get(job_id)
            .map(|ledger| ledger.accepted_urls.len())
            .ok_or_else(|| OracleError::UnknownJob(job_id.to_string()))
    }

    async fn submit_candidates(&self, urls: &[String], job: &JobContext) -> Result<(), OracleError> {
        let mut jobs = self.jobs();
        let ledger = jobs
            .get_mut(&job.job_id)
            .ok_or_else(|| OracleError::UnknownJob(job.job_id.clone()))?;

        for url in urls {
            ledger.submitted += 1;
            let Some(host) = company_host(url) else {
                debug!(job_id = %job.job_id, url = %url, "Rejected candidate without http(s) host");
                continue;
            };
            if ledger.accepted_hosts.insert(host) {
                ledger.accepted_urls.push(url.clone());
            }
        }
        Ok(())
    }
}

/// Lowercased host without a leading `www.`
fn company_host(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    let host = parsed.host_str()?.to_ascii_lowercase();
    Some(host.strip_prefix("www.").map(str::to_string).unwrap_or(host))
}
