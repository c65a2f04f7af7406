//! Offline query planner built from fixed templates.

use async_trait::async_trait;
use prospect_application::ports::query_planner::{PlannerError, QueryPlanner};
use prospect_domain::PlanningHints;

const PLAN_TEMPLATES: &[&str] = &[
    "{p} contact information",
    "{p} email phone",
    "{p} address contact details",
];

const DIVERSIFY_TEMPLATES: &[&str] = &["{p}", "{p} official website", "{p} about us"];

/// Planner that needs no network access.
///
/// Location hints are not added here: the search source appends them to
/// every query anyway.
#[derive(Debug, Clone)]
pub struct TemplateQueryPlanner {
    max_queries: usize,
}

impl TemplateQueryPlanner {
    pub fn new() -> Self {
        Self {
            max_queries: PLAN_TEMPLATES.len(),
        }
    }

    pub fn with_max_queries(mut self, max: usize) -> Self {
        self.max_queries = max;
        self
    }

    fn expand(&self, templates: &[&str], prompt: &str) -> Vec<String> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Vec::new();
        }
        templates
            .iter()
            .take(self.max_queries)
            .map(|t| t.replace("{p}", prompt))
            .collect()
    }
}

impl Default for TemplateQueryPlanner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryPlanner for TemplateQueryPlanner {
    async fn plan(&self, prompt: &str, _hints: &PlanningHints) -> Result<Vec<String>, PlannerError> {
        Ok(self.expand(PLAN_TEMPLATES, prompt))
    }

    async fn diversify(
        &self,
        prompt: &str,
        _hints: &PlanningHints,
    ) -> Result<Vec<String>, PlannerError> {
        Ok(self.expand(DIVERSIFY_TEMPLATES, prompt))
    }
}
