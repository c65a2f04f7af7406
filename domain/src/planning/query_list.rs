//! Parsing of planner output into a query list.
//!
//! Planners answer in loosely formatted text: comma separated, one per
//! line, numbered, bulleted, or quoted. [`parse_query_list`] normalises all
//! of these into a clean, ordered, duplicate-free list.

use regex::Regex;
use std::sync::LazyLock;

/// Queries this short carry too little signal to be worth a source call.
pub const MIN_QUERY_LEN: usize = 6;

static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+[.)]\s*|[-*•]\s*)").expect("valid list marker regex")
});

/// Split planner output into at most `max_queries` distinct queries.
pub fn parse_query_list(output: &str, max_queries: usize) -> Vec<String> {
    let mut queries: Vec<String> = Vec::new();

    for line in output.lines() {
        let line = clean_fragment(line);
        if line.is_empty() {
            continue;
        }
        for part in line.split(',') {
            let query = clean_fragment(part);
            if query.chars().count() >= MIN_QUERY_LEN && !queries.contains(&query) {
                queries.push(query);
            }
        }
    }

    queries.truncate(max_queries);
    queries
}

fn clean_fragment(raw: &str) -> String {
    let trimmed = raw.trim();
    let unmarked = LIST_MARKER.replace(trimmed, "");
    unmarked
        .trim()
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_separated() {
        let out = "plumbers Austin contact, \"plumbing company Austin email\", Austin plumber reach us";
        assert_eq!(
            parse_query_list(out, 5),
            vec![
                "plumbers Austin contact".to_string(),
                "plumbing company Austin email".to_string(),
                "Austin plumber reach us".to_string(),
            ]
        );
    }

    #[test]
    fn test_numbered_and_bulleted_lines() {
        let out = "1. roofing contractors Denver contact\n- roofers Denver email\n* 'Denver roofing support'";
        let queries = parse_query_list(out, 5);
        assert_eq!(queries.len(), 3);
        assert_eq!(queries[0], "roofing contractors Denver contact");
        assert_eq!(queries[2], "Denver roofing support");
    }

    #[test]
    fn test_drops_short_and_duplicate_entries() {
        let out = "abc, dental clinic Leeds contact, dental clinic Leeds contact";
        assert_eq!(parse_query_list(out, 5), vec!["dental clinic Leeds contact".to_string()]);
    }

    #[test]
    fn test_caps_at_max() {
        let out = "query one long, query two long, query three long, query four long";
        assert_eq!(parse_query_list(out, 2).len(), 2);
    }

    #[test]
    fn test_empty_output() {
        assert!(parse_query_list("", 5).is_empty());
    }
}
