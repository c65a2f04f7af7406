//! Search session entity

use super::page::{PageResult, Pagination, QueryInfo, SessionInfo};
use super::value_objects::{MAX_QUERY_OFFSET, ResultItem, SessionId};
use crate::planning::hints::PlanningHints;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};

/// The merged, growable result buffer for one (caller, prompt, day) key.
///
/// Results are append-only and deduplicated by link, so an offset that
/// was valid once keeps pointing at the same item. Every query carries a
/// cursor counting the items already requested upstream; the cursor is the
/// next 1-based start offset minus one and never exceeds
/// [`MAX_QUERY_OFFSET`].
///
/// A session starts unplanned (no queries). Installing the planner's
/// queries marks it planned; replacing them with a diversified set discards
/// the old cursors and clears exhaustion.
#[derive(Debug, Clone)]
pub struct SearchSession {
    id: SessionId,
    original_prompt: String,
    hints: PlanningHints,
    queries: Vec<String>,
    results: Vec<ResultItem>,
    seen_links: HashSet<String>,
    query_positions: HashMap<String, usize>,
    planned: bool,
    diversified: bool,
    exhausted: bool,
    last_returned_offset: usize,
    total_source_calls: u64,
    created_at: DateTime<Utc>,
    last_accessed_at: DateTime<Utc>,
}

impl SearchSession {
    pub fn new(id: SessionId, original_prompt: impl Into<String>, hints: PlanningHints) -> Self {
        let now = Utc::now();
        Self {
            id,
            original_prompt: original_prompt.into(),
            hints,
            queries: Vec::new(),
            results: Vec::new(),
            seen_links: HashSet::new(),
            query_positions: HashMap::new(),
            planned: false,
            diversified: false,
            exhausted: false,
            last_returned_offset: 0,
            total_source_calls: 0,
            created_at: now,
            last_accessed_at: now,
        }
    }

    // ==================== Accessors ====================

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn original_prompt(&self) -> &str {
        &self.original_prompt
    }

    pub fn hints(&self) -> &PlanningHints {
        &self.hints
    }

    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    pub fn results(&self) -> &[ResultItem] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn is_planned(&self) -> bool {
        self.planned
    }

    pub fn is_diversified(&self) -> bool {
        self.diversified
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn last_returned_offset(&self) -> usize {
        self.last_returned_offset
    }

    pub fn total_source_calls(&self) -> u64 {
        self.total_source_calls
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_accessed_at(&self) -> DateTime<Utc> {
        self.last_accessed_at
    }

    /// Items already requested upstream for `query` (0 for unknown queries)
    pub fn cursor(&self, query: &str) -> usize {
        self.query_positions.get(query).copied().unwrap_or(0)
    }

    /// Whether `query` can still be paginated
    pub fn has_capacity(&self, query: &str) -> bool {
        self.cursor(query) < MAX_QUERY_OFFSET
    }

    /// Whether serving `required_count` items needs another growth pass
    pub fn needs_more(&self, required_count: usize) -> bool {
        self.results.len() < required_count && !self.exhausted
    }

    // ==================== Mutations ====================

    /// Install the planner's initial queries and mark the session planned.
    pub fn install_queries(&mut self, queries: Vec<String>) {
        self.set_queries(queries);
        self.planned = true;
    }

    /// Replace the active queries with a broader set.
    ///
    /// Cursors of the old set are discarded. Already merged results stay.
    pub fn replace_queries(&mut self, queries: Vec<String>) {
        self.set_queries(queries);
        self.planned = true;
        self.diversified = true;
    }

    fn set_queries(&mut self, queries: Vec<String>) {
        let mut unique: Vec<String> = Vec::with_capacity(queries.len());
        for query in queries {
            let query = query.trim().to_string();
            if !query.is_empty() && !unique.contains(&query) {
                unique.push(query);
            }
        }
        self.query_positions = unique.iter().map(|q| (q.clone(), 0)).collect();
        self.queries = unique;
        self.exhausted = false;
        self.touch();
    }

    /// Merge one fetched batch for `query`.
    ///
    /// The cursor advances by the raw batch size (upstream progress), while
    /// only links not yet in the session are appended. Items without a link
    /// cannot be deduplicated and are dropped. Returns the number of items
    /// added.
    pub fn merge_batch(&mut self, query: &str, batch: Vec<ResultItem>) -> usize {
        let fetched = batch.len();
        let mut added = 0;

        for item in batch {
            if item.link.is_empty() || self.seen_links.contains(&item.link) {
                continue;
            }
            self.seen_links.insert(item.link.clone());
            self.results.push(item);
            added += 1;
        }

        let cursor = self.query_positions.entry(query.to_string()).or_insert(0);
        *cursor = (*cursor + fetched).min(MAX_QUERY_OFFSET);
        self.total_source_calls += 1;
        self.touch();
        added
    }

    /// Record that a full growth pass produced nothing new.
    pub fn mark_exhausted(&mut self) {
        self.exhausted = true;
    }

    /// Serve `results[offset..offset + count]` with pagination metadata.
    ///
    /// `last_returned_offset` only moves forward: serving an earlier slice
    /// does not rewind the continuation position.
    pub fn page(&mut self, offset: usize, count: usize) -> PageResult {
        self.touch();

        let start = offset.min(self.results.len());
        let end = offset.saturating_add(count).min(self.results.len());
        let results = self.results[start..end].to_vec();
        let returned = results.len();
        let served_through = offset + returned;
        self.last_returned_offset = self.last_returned_offset.max(served_through);

        let has_more = served_through < self.results.len() || !self.exhausted;

        PageResult {
            results,
            pagination: Pagination {
                offset,
                results_returned: returned,
                total_results_available: self.results.len(),
                has_more,
                next_offset: has_more.then_some(served_through),
            },
            session_info: self.session_info(),
            query_info: self.query_info(),
        }
    }

    pub fn session_info(&self) -> SessionInfo {
        SessionInfo {
            session_id: self.id.clone(),
            total_results: self.results.len(),
            total_results_served: self.last_returned_offset,
            total_source_calls: self.total_source_calls,
            created_at: self.created_at,
            last_accessed_at: self.last_accessed_at,
            is_exhausted: self.exhausted,
            diversified: self.diversified,
        }
    }

    pub fn query_info(&self) -> QueryInfo {
        QueryInfo {
            original_prompt: self.original_prompt.clone(),
            generated_queries: self.queries.clone(),
            query_positions: self
                .query_positions
                .iter()
                .map(|(q, p)| (q.clone(), *p))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn touch(&mut self) {
        self.last_accessed_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SearchSession {
        SearchSession::new(SessionId::new("s1"), "roofers", PlanningHints::default())
    }

    fn items(prefix: &str, n: usize) -> Vec<ResultItem> {
        (0..n)
            .map(|i| ResultItem::new(format!("{prefix} {i}"), format!("https://{prefix}{i}.test"), i + 1))
            .collect()
    }

    #[test]
    fn test_new_session_is_unplanned() {
        let s = session();
        assert!(!s.is_planned());
        assert!(s.queries().is_empty());
        assert!(s.needs_more(1));
    }

    #[test]
    fn test_install_queries_dedupes_and_resets_cursors() {
        let mut s = session();
        s.install_queries(vec!["a".into(), " a ".into(), "".into(), "b".into()]);
        assert_eq!(s.queries(), &["a".to_string(), "b".to_string()]);
        assert_eq!(s.cursor("a"), 0);
        assert!(s.is_planned());
        assert!(!s.is_diversified());
    }

    #[test]
    fn test_merge_batch_dedupes_but_advances_raw_cursor() {
        let mut s = session();
        s.install_queries(vec!["q1".into(), "q2".into()]);
        assert_eq!(s.merge_batch("q1", items("x", 4)), 4);

        let mut overlap = items("x", 2);
        overlap.extend(items("y", 3));
        assert_eq!(s.merge_batch("q2", overlap), 3);

        assert_eq!(s.len(), 7);
        assert_eq!(s.cursor("q1"), 4);
        assert_eq!(s.cursor("q2"), 5);
        assert_eq!(s.total_source_calls(), 2);
    }

    #[test]
    fn test_merge_batch_drops_items_without_link() {
        let mut s = session();
        s.install_queries(vec!["q".into()]);
        let batch = vec![ResultItem::new("no link", "", 1), ResultItem::new("ok", "https://ok.test", 2)];
        assert_eq!(s.merge_batch("q", batch), 1);
        assert_eq!(s.cursor("q"), 2);
    }

    #[test]
    fn test_cursor_never_exceeds_cap() {
        let mut s = session();
        s.install_queries(vec!["q".into()]);
        for round in 0..12 {
            s.merge_batch("q", items(&format!("r{round}-"), 10));
        }
        assert_eq!(s.cursor("q"), MAX_QUERY_OFFSET);
        assert!(!s.has_capacity("q"));
    }

    #[test]
    fn test_page_reports_has_more_until_exhausted() {
        let mut s = session();
        s.install_queries(vec!["q".into()]);
        s.merge_batch("q", items("x", 12));

        let page = s.page(0, 10);
        assert_eq!(page.pagination.results_returned, 10);
        assert_eq!(page.pagination.total_results_available, 12);
        assert!(page.pagination.has_more);
        assert_eq!(page.pagination.next_offset, Some(10));

        s.mark_exhausted();
        let tail = s.page(10, 10);
        assert_eq!(tail.pagination.results_returned, 2);
        assert!(!tail.pagination.has_more);
        assert_eq!(tail.pagination.next_offset, None);
    }

    #[test]
    fn test_page_beyond_end_is_empty() {
        let mut s = session();
        s.install_queries(vec!["q".into()]);
        s.merge_batch("q", items("x", 3));
        let page = s.page(10, 5);
        assert!(page.results.is_empty());
        assert!(page.pagination.has_more);
    }

    #[test]
    fn test_last_returned_offset_only_increases() {
        let mut s = session();
        s.install_queries(vec!["q".into()]);
        s.merge_batch("q", items("x", 10));
        s.page(0, 8);
        assert_eq!(s.last_returned_offset(), 8);
        s.page(0, 2);
        assert_eq!(s.last_returned_offset(), 8);
    }

    #[test]
    fn test_replace_queries_clears_exhaustion_and_cursors() {
        let mut s = session();
        s.install_queries(vec!["narrow".into()]);
        s.merge_batch("narrow", Vec::new());
        s.mark_exhausted();

        s.replace_queries(vec!["broad".into()]);
        assert!(!s.is_exhausted());
        assert!(s.is_diversified());
        assert_eq!(s.cursor("narrow"), 0);
        assert_eq!(s.query_info().generated_queries, vec!["broad".to_string()]);
    }
}
