//! Console output formatter for pages and collection reports

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use prospect_domain::{CollectionReport, PageResult};

/// Formats results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_page(&self, page: &PageResult) -> String {
        let mut output = String::new();
        let pagination = &page.pagination;

        output.push_str(&Self::header("Search Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Prompt:".cyan().bold(),
            page.query_info.original_prompt
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Session:".cyan().bold(),
            page.session_id()
        ));
        if !page.query_info.generated_queries.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Queries:".cyan().bold(),
                page.query_info.generated_queries.join(" | ")
            ));
        }

        let last = pagination.offset + pagination.results_returned;
        output.push_str(&Self::section_header(&format!(
            "Items {}-{} of {}",
            pagination.offset + 1,
            last,
            pagination.total_results_available
        )));

        if page.results.is_empty() {
            output.push_str(&format!("{}\n", "No results.".dimmed()));
        }
        for (i, item) in page.results.iter().enumerate() {
            output.push_str(&format!(
                "\n{:>3}. {}\n     {}\n",
                pagination.offset + i + 1,
                item.title.bold(),
                item.link.blue()
            ));
            if !item.snippet.is_empty() {
                output.push_str(&format!("     {}\n", item.snippet.dimmed()));
            }
        }

        output.push('\n');
        match pagination.next_offset {
            Some(next) => output.push_str(&format!(
                "{} next offset {}\n",
                "More available:".green(),
                next
            )),
            None => output.push_str(&format!("{}\n", "No more results.".yellow())),
        }
        if page.session_info.diversified {
            output.push_str(&format!(
                "{}\n",
                "Initial queries found nothing; broader queries were used.".dimmed()
            ));
        }

        output
    }

    fn format_report(&self, report: &CollectionReport, accepted: &[String]) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Collection Report"));
        output.push('\n');

        let outcome = if report.outcome.is_fulfilled() {
            report.outcome.to_string().green().bold()
        } else {
            report.outcome.to_string().yellow().bold()
        };
        output.push_str(&format!("{} {}\n", "Outcome:".cyan().bold(), outcome));
        output.push_str(&format!(
            "{} {}/{}\n",
            "Accepted:".cyan().bold(),
            report.accepted_count,
            report.target_count
        ));
        output.push_str(&format!(
            "{} {} in {} chunks ({} fetched)\n",
            "Submitted:".cyan().bold(),
            report.total_consumed,
            report.chunks_submitted,
            report.candidates_fetched
        ));

        if !accepted.is_empty() {
            output.push_str(&Self::section_header("Accepted Leads"));
            for url in accepted {
                output.push_str(&format!("  * {}\n", url));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prospect_domain::{CollectionOutcome, PlanningHints, ResultItem, SearchSession, SessionId};

    fn page(exhausted: bool) -> PageResult {
        let mut session =
            SearchSession::new(SessionId::new("abc"), "florists in Leeds", PlanningHints::default());
        session.install_queries(vec!["florists Leeds contact".to_string()]);
        session.merge_batch(
            "florists Leeds contact",
            vec![
                ResultItem::new("Rose & Co", "https://rose.test", 1).with_snippet("Flowers daily"),
                ResultItem::new("Tulip Ltd", "https://tulip.test", 2),
            ],
        );
        if exhausted {
            session.mark_exhausted();
        }
        session.page(0, 10)
    }

    #[test]
    fn test_format_page_lists_items() {
        colored::control::set_override(false);
        let text = ConsoleFormatter.format_page(&page(false));
        assert!(text.contains("Prompt: florists in Leeds"));
        assert!(text.contains("Items 1-2 of 2"));
        assert!(text.contains("  1. Rose & Co"));
        assert!(text.contains("Flowers daily"));
        assert!(text.contains("More available: next offset 2"));
    }

    #[test]
    fn test_format_page_when_exhausted() {
        colored::control::set_override(false);
        let text = ConsoleFormatter.format_page(&page(true));
        assert!(text.contains("No more results."));
    }

    #[test]
    fn test_format_report() {
        colored::control::set_override(false);
        let report = CollectionReport {
            outcome: CollectionOutcome::TargetMet,
            target_count: 2,
            accepted_count: 2,
            total_consumed: 6,
            chunks_submitted: 1,
            candidates_fetched: 10,
        };
        let text = ConsoleFormatter.format_report(&report, &["https://rose.test".to_string()]);
        assert!(text.contains("Outcome: target_met"));
        assert!(text.contains("Accepted: 2/2"));
        assert!(text.contains("Submitted: 6 in 1 chunks (10 fetched)"));
        assert!(text.contains("  * https://rose.test"));
    }
}
