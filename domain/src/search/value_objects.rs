//! Value objects for the search subdomain

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Largest page a single source request may ask for.
pub const MAX_PAGE_SIZE: usize = 10;

/// Hard cap on how far a single query may be paginated upstream.
pub const MAX_QUERY_OFFSET: usize = 100;

/// One ranked hit returned by the search source.
///
/// `link` is the stable external identifier: a session never holds two
/// items with the same link. `rank` is the 1-based position within the
/// query that produced it and carries no meaning across queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    pub title: String,
    pub link: String,
    pub snippet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub rank: usize,
}

impl ResultItem {
    pub fn new(title: impl Into<String>, link: impl Into<String>, rank: usize) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            snippet: String::new(),
            source: None,
            rank,
        }
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Identifier of a [`SearchSession`](super::entities::SearchSession).
///
/// Derived deterministically from (caller, prompt, calendar day), so that
/// repeated requests on the same day land on the same session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive the session id for a caller's prompt on a given day.
    pub fn derive(caller_id: &str, prompt: &str, day: NaiveDate) -> Self {
        let key = format!("{}\u{1f}{}\u{1f}{}", caller_id, prompt, day);
        let uuid = Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes());
        Self(uuid.simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_session_id_is_deterministic() {
        let a = SessionId::derive("alice", "plumbers in Austin", day(2025, 3, 1));
        let b = SessionId::derive("alice", "plumbers in Austin", day(2025, 3, 1));
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 32);
    }

    #[test]
    fn test_session_id_varies_by_key_parts() {
        let base = SessionId::derive("alice", "plumbers", day(2025, 3, 1));
        assert_ne!(base, SessionId::derive("bob", "plumbers", day(2025, 3, 1)));
        assert_ne!(base, SessionId::derive("alice", "roofers", day(2025, 3, 1)));
        assert_ne!(base, SessionId::derive("alice", "plumbers", day(2025, 3, 2)));
    }

    #[test]
    fn test_session_id_separator_prevents_collisions() {
        let a = SessionId::derive("ab", "c", day(2025, 3, 1));
        let b = SessionId::derive("a", "bc", day(2025, 3, 1));
        assert_ne!(a, b);
    }

    #[test]
    fn test_result_item_serialization_skips_missing_source() {
        let item = ResultItem::new("Acme", "https://acme.test", 1);
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("source").is_none());
        assert_eq!(json["rank"], 1);
    }
}
