//! Lightweight location hint extraction.
//!
//! Finds place names in a prospecting prompt without any gazetteer:
//!
//! | Pattern | Example | Extracted |
//! |---------|---------|-----------|
//! | hint word + capitalised words | `agencies in New Delhi` | `New Delhi` |
//! | quoted phrase | `cafes "São Paulo"` | `São Paulo` |
//! | `City, Region` pair | `Mumbai, India` | `Mumbai India` |
//! | trailing `in <place>` | `plumbers in delhi ncr` | `delhi ncr` |

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Maximum number of locations returned.
pub const MAX_LOCATIONS: usize = 5;

static HINTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?i:based in|in|near|around|from|for|within|across)\s+([A-Z][\w'&.-]+(?:\s+[A-Z][\w'&.-]+){0,3})",
    )
    .expect("valid hinted location regex")
});

static QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([^"]{2,80})"|'([^']{2,80})'"#).expect("valid quoted location regex")
});

static COMMA_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][\w.&'-]+(?:\s+[A-Z][\w.&'-]+){0,2}),\s*([A-Za-z]{2,})\b")
        .expect("valid comma location regex")
});

static TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bin\s+([a-z][\w\s.&'-]{2,50})$").expect("valid tail location regex")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Extract up to [`MAX_LOCATIONS`] locations, deduplicated case-insensitively
/// in order of discovery.
pub fn extract_locations(prompt: &str) -> Vec<String> {
    let text = prompt.trim();
    let mut found: Vec<String> = Vec::new();

    for caps in HINTED.captures_iter(text) {
        if let Some(m) = caps.get(1) {
            found.push(m.as_str().to_string());
        }
    }

    for caps in QUOTED.captures_iter(text) {
        if let Some(m) = caps.get(1).or_else(|| caps.get(2))
            && m.as_str().chars().any(|c| c.is_ascii_alphabetic())
        {
            found.push(m.as_str().to_string());
        }
    }

    for caps in COMMA_PAIR.captures_iter(text) {
        if let (Some(place), Some(region)) = (caps.get(1), caps.get(2)) {
            found.push(format!("{} {}", place.as_str(), region.as_str()));
        }
    }

    if let Some(m) = TAIL.captures(text).and_then(|caps| caps.get(1)) {
        found.push(m.as_str().to_string());
    }

    let mut seen = HashSet::new();
    found
        .into_iter()
        .map(|raw| {
            WHITESPACE
                .replace_all(&raw, " ")
                .trim_matches(|c: char| c == ' ' || c == ',')
                .to_string()
        })
        .filter(|loc| !loc.is_empty() && seen.insert(loc.to_lowercase()))
        .take(MAX_LOCATIONS)
        .collect()
}
