//! Google Custom Search JSON API adapter.
//!
//! Implements [`SearchSource`] on top of the Custom Search endpoint:
//!
//! | Parameter | Value |
//! |-----------|-------|
//! | `q` | decorated query (see [`decorate_query`]) |
//! | `key` / `cx` | API key and search engine id |
//! | `start` | 1-based offset |
//! | `num` | page size, 1..=10 |
//!
//! A missing `items` array is the provider's way of saying "no results"
//! and maps to an empty page. HTTP 403/429 are quota refusals and surface
//! as [`SourceError::Throttled`].

use async_trait::async_trait;
use prospect_application::ports::search_source::{SearchSource, SourceError, SourceRequest};
use prospect_domain::{MAX_PAGE_SIZE, PlanningHints, ResultItem};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Custom Search JSON API endpoint.
pub const DEFAULT_CSE_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 12;

/// Directory and listicle sites excluded from every query.
pub const DEFAULT_EXCLUDED_SITES: &[&str] = &[
    "justdial.com",
    "sulekha.com",
    "indiamart.com",
    "yellowpages.",
    "yelp.",
    "tripadvisor.",
    "zomato.com",
    "clutch.co",
    "g2.com",
    "capterra",
    "goodfirms",
    "topdevelopers",
    "serchen.com",
    "reddit.com",
];

const LISTICLE_EXCLUSIONS: &str = r#"-"Top" -"Best" -"List of""#;

/// Search source backed by Google Custom Search.
pub struct GoogleCseClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    engine_id: String,
    excluded_sites: Vec<String>,
}

impl GoogleCseClient {
    pub fn new(
        api_key: impl Into<String>,
        engine_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let api_key = api_key.into();
        let engine_id = engine_id.into();
        if api_key.trim().is_empty() {
            return Err(SourceError::NotConfigured("search.api_key is empty".into()));
        }
        if engine_id.trim().is_empty() {
            return Err(SourceError::NotConfigured("search.engine_id is empty".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("prospect-search/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: DEFAULT_CSE_URL.to_string(),
            api_key,
            engine_id,
            excluded_sites: DEFAULT_EXCLUDED_SITES.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_excluded_sites(mut self, sites: Vec<String>) -> Self {
        self.excluded_sites = sites;
        self
    }
}

#[async_trait]
impl SearchSource for GoogleCseClient {
    async fn fetch(&self, request: &SourceRequest<'_>) -> Result<Vec<ResultItem>, SourceError> {
        let query = decorate_query(request.query, request.hints, &self.excluded_sites);
        let start = request.start.max(1);
        let num = request.page_size.clamp(1, MAX_PAGE_SIZE);
        let (start_param, num_param) = (start.to_string(), num.to_string());

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", query.as_str()),
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("start", start_param.as_str()),
                ("num", num_param.as_str()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                status = status.as_u16(),
                query = %query,
                start,
                num,
                error = %body,
                "Custom Search request failed"
            );
            return Err(classify_status(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SourceError::InvalidResponse(e.to_string()))?;
        let items = normalize_items(&body, start);

        debug!(
            query = %query,
            start,
            num,
            returned = items.len(),
            total = body["searchInformation"]["totalResults"].as_str().unwrap_or("0"),
            "Custom Search page"
        );
        Ok(items)
    }
}

/// Append quoted location hints, site exclusions and listicle exclusions.
pub fn decorate_query(query: &str, hints: &PlanningHints, excluded_sites: &[String]) -> String {
    let mut parts: Vec<String> = vec![query.trim().to_string()];
    parts.extend(hints.locations.iter().map(|loc| format!("\"{loc}\"")));
    parts.extend(excluded_sites.iter().map(|site| format!("-site:{site}")));
    parts.push(LISTICLE_EXCLUSIONS.to_string());
    parts.retain(|p| !p.is_empty());
    parts.join(" ")
}

/// Map a non-success HTTP status to a source error.
pub fn classify_status(status: u16) -> SourceError {
    match status {
        403 | 429 => SourceError::Throttled { status },
        _ => SourceError::Http { status },
    }
}

/// Convert a Custom Search response body into ranked items.
///
/// `rank` is `start + index`, which is only meaningful within the query
/// that produced the page. Every upstream item is kept so the batch length
/// matches what the provider paged through; items without a link carry an
/// empty `link` and are dropped when merged into a session.
pub fn normalize_items(body: &Value, start: usize) -> Vec<ResultItem> {
    let Some(items) = body["items"].as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let link = item["link"].as_str().unwrap_or_default().trim();
            let mut result = ResultItem::new(
                item["title"].as_str().unwrap_or_default(),
                link,
                start + index,
            )
            .with_snippet(item["snippet"].as_str().unwrap_or_default());
            if let Some(source) = item["displayLink"].as_str()
                && !source.is_empty()
            {
                result = result.with_source(source);
            }
            result
        })
        .collect()
}

fn transport_error(e: reqwest::Error) -> SourceError {
    if e.is_timeout() {
        SourceError::Timeout
    } else {
        SourceError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sites() -> Vec<String> {
        vec!["yelp.".to_string(), "reddit.com".to_string()]
    }

    #[test]
    fn test_decorate_query_without_locations() {
        let q = decorate_query("plumbers contact email", &PlanningHints::default(), &sites());
        assert_eq!(
            q,
            r#"plumbers contact email -site:yelp. -site:reddit.com -"Top" -"Best" -"List of""#
        );
    }

    #[test]
    fn test_decorate_query_quotes_locations() {
        let hints = PlanningHints::with_locations(vec!["New Delhi".to_string(), "Noida".to_string()]);
        let q = decorate_query("web agencies", &hints, &[]);
        assert!(q.starts_with(r#"web agencies "New Delhi" "Noida""#));
        assert!(q.ends_with(LISTICLE_EXCLUSIONS));
    }

    #[test]
    fn test_default_exclusions_cover_directories() {
        assert!(DEFAULT_EXCLUDED_SITES.contains(&"justdial.com"));
        assert_eq!(DEFAULT_EXCLUDED_SITES.len(), 14);
    }

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status(429), SourceError::Throttled { status: 429 });
        assert_eq!(classify_status(403), SourceError::Throttled { status: 403 });
        assert_eq!(classify_status(500), SourceError::Http { status: 500 });
        assert!(!classify_status(400).is_throttled());
    }

    #[test]
    fn test_normalize_items() {
        let body = json!({
            "items": [
                {"title": "Acme Plumbing", "link": "https://acme.test/contact", "snippet": "Call us", "displayLink": "acme.test"},
                {"title": "No link"},
                {"title": "Beta", "link": "https://beta.test", "displayLink": ""}
            ]
        });
        let items = normalize_items(&body, 11);
        // raw page length, so the session cursor follows upstream paging
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].rank, 11);
        assert_eq!(items[0].source.as_deref(), Some("acme.test"));
        assert_eq!(items[0].snippet, "Call us");
        assert!(items[1].link.is_empty());
        assert_eq!(items[1].rank, 12);
        assert_eq!(items[2].rank, 13);
        assert!(items[2].source.is_none());
    }

    #[test]
    fn test_missing_items_is_empty_page() {
        let body = json!({"searchInformation": {"totalResults": "0"}});
        assert!(normalize_items(&body, 1).is_empty());
    }

    #[test]
    fn test_new_requires_credentials() {
        let err = GoogleCseClient::new("", "cx", Duration::from_secs(1)).err();
        assert!(matches!(err, Some(SourceError::NotConfigured(_))));
        assert!(GoogleCseClient::new("key", "cx", Duration::from_secs(1)).is_ok());
    }
}
