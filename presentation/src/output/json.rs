//! JSON output formatter

use crate::output::formatter::OutputFormatter;
use prospect_domain::{CollectionReport, PageResult};
use serde_json::json;

/// Formats pages and reports as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_page(&self, page: &PageResult) -> String {
        serde_json::to_string_pretty(page).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_report(&self, report: &CollectionReport, accepted: &[String]) -> String {
        serde_json::to_string_pretty(&json!({
            "report": report,
            "accepted_urls": accepted,
        }))
        .unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prospect_domain::CollectionOutcome;

    #[test]
    fn test_report_json_shape() {
        let report = CollectionReport {
            outcome: CollectionOutcome::CapReached,
            target_count: 20,
            accepted_count: 3,
            total_consumed: 15,
            chunks_submitted: 2,
            candidates_fetched: 20,
        };
        let text = JsonFormatter.format_report(&report, &["https://a.test".to_string()]);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["report"]["outcome"], "cap_reached");
        assert_eq!(value["report"]["total_consumed"], 15);
        assert_eq!(value["accepted_urls"][0], "https://a.test");
    }
}
