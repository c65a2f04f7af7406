//! Output formatter trait

use prospect_domain::{CollectionReport, PageResult};

/// Trait for formatting pages and collection reports
pub trait OutputFormatter {
    /// Format one served page
    fn format_page(&self, page: &PageResult) -> String;

    /// Format the terminal report of a collection job with the accepted URLs
    fn format_report(&self, report: &CollectionReport, accepted: &[String]) -> String;
}
