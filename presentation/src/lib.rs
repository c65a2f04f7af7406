//! Presentation layer for prospect-search
//!
//! This crate contains CLI definitions, output formatters
//! and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, CollectArgs, Command, OutputFormat, SearchArgs};
pub use output::{console::ConsoleFormatter, formatter::OutputFormatter, json::JsonFormatter};
pub use progress::reporter::{CollectionProgressReporter, SimpleCollectionProgress};
