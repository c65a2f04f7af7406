//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for pages and collection reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing
    #[default]
    Text,
    /// JSON output
    Json,
}

/// CLI arguments for prospect-search
#[derive(Parser, Debug)]
#[command(name = "prospect-search")]
#[command(author, version, about = "Paginated lead search over multiple generated queries")]
#[command(long_about = r#"
prospect-search turns a free-form prompt into several web search queries,
merges their results into one deduplicated session and serves it page by page.

The collect command keeps pulling candidates from the session until enough
of them are accepted, the results run out, or the pull cap is reached.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./prospect.toml     Project-level config
3. ~/.config/prospect-search/config.toml   Global config

Environment variables PROSPECT_<SECTION>__<KEY>, GOOGLE_API_KEY, GOOGLE_CSE_ID,
OPENAI_API_KEY, OPENAI_MODEL and OPENAI_MODEL_DIVERSIFY override files.

Example:
  prospect-search search "digital marketing agencies in New Delhi" --count 10 --pages 2
  prospect-search collect "dentists near Austin" --target 20 --max-total-pull 60
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Caller identity used to key sessions
    #[arg(long, global = true, value_name = "ID", default_value = "cli")]
    pub caller: String,

    /// Use the offline template planner instead of the configured one
    #[arg(long, global = true)]
    pub template_planner: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve one or more pages of merged results for a prompt
    Search(SearchArgs),
    /// Pull candidates until enough are accepted
    Collect(CollectArgs),
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// What to search for, e.g. "roofing companies in Denver"
    pub prompt: String,

    /// Offset of the first page
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Items per page
    #[arg(short = 'n', long, default_value_t = 10)]
    pub count: usize,

    /// Pages to serve; pages after the first continue where the last ended
    #[arg(long, default_value_t = 1)]
    pub pages: usize,
}

#[derive(Args, Debug)]
pub struct CollectArgs {
    /// What to search for
    pub prompt: String,

    /// Accepted leads to collect
    #[arg(short, long)]
    pub target: usize,

    /// Job identifier (defaults to the session id)
    #[arg(long)]
    pub job_id: Option<String>,

    /// Size of the first page served before collecting (at least 1)
    #[arg(
        long,
        default_value_t = 10,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub initial: usize,

    /// Region filters forwarded to qualification
    #[arg(long = "region", value_name = "REGION")]
    pub regions: Vec<String>,

    /// Override collector.overfetch_factor
    #[arg(long)]
    pub overfetch: Option<f64>,

    /// Override collector.max_total_pull
    #[arg(long)]
    pub max_total_pull: Option<usize>,

    /// Override collector.max_chunk_size
    #[arg(long)]
    pub max_chunk: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from([
            "prospect-search",
            "-vv",
            "search",
            "plumbers in Austin",
            "--count",
            "5",
            "--pages",
            "3",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Command::Search(args)) => {
                assert_eq!(args.prompt, "plumbers in Austin");
                assert_eq!(args.count, 5);
                assert_eq!(args.pages, 3);
                assert_eq!(args.offset, 0);
            }
            other => panic!("expected search, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_collect_with_overrides() {
        let cli = Cli::try_parse_from([
            "prospect-search",
            "collect",
            "dentists",
            "--target",
            "20",
            "--max-total-pull",
            "15",
            "--region",
            "TX",
            "--output",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.output, OutputFormat::Json);
        match cli.command {
            Some(Command::Collect(args)) => {
                assert_eq!(args.target, 20);
                assert_eq!(args.max_total_pull, Some(15));
                assert_eq!(args.regions, vec!["TX".to_string()]);
                assert!(args.overfetch.is_none());
            }
            other => panic!("expected collect, got {other:?}"),
        }
    }

    #[test]
    fn test_collect_rejects_zero_initial() {
        assert!(
            Cli::try_parse_from(["prospect-search", "collect", "dentists", "-t", "5", "--initial", "0"])
                .is_err()
        );
        let cli = Cli::try_parse_from([
            "prospect-search",
            "collect",
            "dentists",
            "-t",
            "5",
            "--initial",
            "1",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Collect(args)) => assert_eq!(args.initial, 1),
            other => panic!("expected collect, got {other:?}"),
        }
    }

    #[test]
    fn test_collect_requires_target() {
        assert!(Cli::try_parse_from(["prospect-search", "collect", "dentists"]).is_err());
    }

    #[test]
    fn test_show_config_without_command() {
        let cli = Cli::try_parse_from(["prospect-search", "--show-config"]).unwrap();
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }
}
