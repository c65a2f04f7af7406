//! LLM-backed query planner.
//!
//! Speaks the OpenAI chat completions protocol, so any compatible
//! provider works by pointing `api_base` at it. The model is asked for
//! plain comma-separated queries; whatever formatting it adds anyway is
//! cleaned up by [`parse_query_list`].

use async_trait::async_trait;
use prospect_application::ports::query_planner::{PlannerError, QueryPlanner};
use prospect_domain::{PlanningHints, parse_query_list};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_API_BASE: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MAX_QUERIES: usize = 5;
pub const DEFAULT_CONTACT_FOCUS: &str = "email";

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Query planner that asks a chat model for search queries.
pub struct LlmQueryPlanner {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
    diversify_model: Option<String>,
    max_queries: usize,
    contact_focus: String,
}

impl LlmQueryPlanner {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, PlannerError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(PlannerError::NotConfigured("planner.api_key is empty".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlannerError::Request(e.to_string()))?;

        Ok(Self {
            client,
            api_base: DEFAULT_API_BASE.to_string(),
            api_key,
            model: model.into(),
            diversify_model: None,
            max_queries: DEFAULT_MAX_QUERIES,
            contact_focus: DEFAULT_CONTACT_FOCUS.to_string(),
        })
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_diversify_model(mut self, model: Option<String>) -> Self {
        self.diversify_model = model;
        self
    }

    pub fn with_max_queries(mut self, max: usize) -> Self {
        self.max_queries = max;
        self
    }

    pub fn with_contact_focus(mut self, focus: impl Into<String>) -> Self {
        self.contact_focus = focus.into();
        self
    }

    async fn complete(&self, model: &str, system_prompt: String) -> Result<String, PlannerError> {
        let url = format!("{}/v1/chat/completions", self.api_base);
        let body = json!({
            "model": model,
            "messages": [{"role": "system", "content": system_prompt}],
            "temperature": 0.7,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| PlannerError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(PlannerError::Request(format!("HTTP {}: {}", status, text)));
        }

        let data: ChatCompletion = response
            .json()
            .await
            .map_err(|e| PlannerError::InvalidResponse(e.to_string()))?;

        data.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| PlannerError::InvalidResponse("No choices in response".to_string()))
    }
}

#[async_trait]
impl QueryPlanner for LlmQueryPlanner {
    async fn plan(&self, prompt: &str, hints: &PlanningHints) -> Result<Vec<String>, PlannerError> {
        let output = self
            .complete(&self.model, plan_prompt(prompt, hints, &self.contact_focus))
            .await?;
        debug!(output = %output, "Planner raw output");

        let queries = parse_query_list(&output, self.max_queries);
        info!(model = %self.model, queries = ?queries, "Planned queries");
        Ok(queries)
    }

    async fn diversify(
        &self,
        prompt: &str,
        hints: &PlanningHints,
    ) -> Result<Vec<String>, PlannerError> {
        let model = self.diversify_model.as_deref().unwrap_or(&self.model);
        let output = self.complete(model, diversify_prompt(prompt, hints)).await?;

        let queries = parse_query_list(&output, self.max_queries);
        info!(model = %model, queries = ?queries, "Diversified queries");
        Ok(queries)
    }
}

fn locations_line(hints: &PlanningHints) -> String {
    if hints.has_locations() {
        hints.locations.join(", ")
    } else {
        "None".to_string()
    }
}

/// System prompt for the initial query set.
pub fn plan_prompt(prompt: &str, hints: &PlanningHints, contact_focus: &str) -> String {
    format!(
        "You write web search queries for lead generation. Produce 4 Google-ready queries \
(comma-separated, plain text, no numbering, no markdown) that find company contact details. \
Optimize for {contact_focus}.

Rules:
- Vary the phrasing: company type with location and words like \"contact\", \"email\", \"reach us\", \"support\".
- Prefer official websites and their Contact, About and Support pages over directories.
- Avoid \"best\", \"top\" and \"list of\" phrasings.
- Mention the locations naturally when there are any.

Locations to target: {locations}
User prompt: {prompt}",
        locations = locations_line(hints),
    )
}

/// System prompt for the broader fallback set.
pub fn diversify_prompt(prompt: &str, hints: &PlanningHints) -> String {
    format!(
        "Earlier search queries for this request found no results at all. Produce 4 broader \
Google-ready queries (comma-separated, plain text, no numbering, no markdown) for the same \
kind of companies.

Rules:
- Use fewer and more general words than a typical contact-page query.
- Try synonyms for the business type and nearby or wider regions.
- Do not require the words \"contact\" or \"email\".

Locations to target: {locations}
User prompt: {prompt}",
        locations = locations_line(hints),
    )
}
