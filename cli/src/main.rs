//! CLI entrypoint for prospect-search
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use prospect_application::{
    AcceptanceOracle, CandidateFeed, CollectInput, CollectionProgress, DeficitCollector,
    InMemorySessionStore, JobContext, NoCollectionProgress, NoEventLogger, QueryPlanner,
    SearchEngine, SearchEventLogger, SearchSource,
};
use prospect_infrastructure::{
    ConfigLoader, FileConfig, GoogleCseClient, InMemoryAcceptanceLedger, JsonlEventLogger,
    LlmQueryPlanner, PlannerKind, TemplateQueryPlanner,
};
use prospect_presentation::{
    Cli, CollectArgs, CollectionProgressReporter, Command, ConsoleFormatter, JsonFormatter,
    OutputFormat, OutputFormatter, SearchArgs, SimpleCollectionProgress,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_env_only()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    let issues = config.validate();
    if !issues.is_empty() {
        let messages: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
        bail!("Invalid configuration: {}", messages.join("; "));
    }

    let Some(command) = cli.command.as_ref() else {
        bail!("No command given. Run with --help for usage.");
    };

    info!("Starting prospect-search");

    // === Dependency Injection ===
    let events = build_event_logger(&config);
    let planner = build_planner(&config, cli.template_planner)?;
    let source = build_source(&config)?;
    let engine = Arc::new(
        SearchEngine::new(planner, source, Arc::new(InMemorySessionStore::new()))
            .with_params(config.search.to_engine_params())
            .with_event_logger(Arc::clone(&events)),
    );

    let formatter: Box<dyn OutputFormatter> = match cli.output {
        OutputFormat::Text => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    };

    match command {
        Command::Search(args) => run_search(&cli, args, &engine, formatter.as_ref()).await,
        Command::Collect(args) => {
            run_collect(&cli, args, &config, engine, events, formatter.as_ref()).await
        }
    }
}

async fn run_search(
    cli: &Cli,
    args: &SearchArgs,
    engine: &SearchEngine,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let mut page = engine
        .search_with_offset(&args.prompt, &cli.caller, args.offset, args.count)
        .await?;
    println!("{}", formatter.format_page(&page));

    for _ in 1..args.pages {
        if !page.pagination.has_more {
            break;
        }
        page = engine
            .get_more_results(page.session_id(), args.count)
            .await?;
        println!("{}", formatter.format_page(&page));
    }

    Ok(())
}

async fn run_collect(
    cli: &Cli,
    args: &CollectArgs,
    config: &FileConfig,
    engine: Arc<SearchEngine>,
    events: Arc<dyn SearchEventLogger>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let first = engine
        .search_with_offset(&args.prompt, &cli.caller, 0, args.initial)
        .await?;
    let session_id = first.session_id().clone();
    let job_id = args.job_id.clone().unwrap_or_else(|| session_id.to_string());

    let mut policy = config.collector.to_policy(args.target);
    if let Some(factor) = args.overfetch {
        policy = policy.with_overfetch_factor(factor);
    }
    if let Some(max) = args.max_total_pull {
        policy = policy.with_max_total_pull(max);
    }
    if let Some(max) = args.max_chunk {
        policy = policy.with_max_chunk_size(max);
    }

    let ledger = Arc::new(InMemoryAcceptanceLedger::new());
    ledger.register(&job_id);

    let job = JobContext::new(&job_id, &cli.caller).with_region_filters(args.regions.clone());
    let input = CollectInput::new(job, session_id, policy).with_initial_candidates(first.results);

    let feed: Arc<dyn CandidateFeed> = engine;
    let oracle: Arc<dyn AcceptanceOracle> = ledger.clone();
    let collector = Arc::new(DeficitCollector::new(feed, oracle).with_event_logger(events));

    // Log lines would tear the bar apart, so verbose runs print plain lines
    let progress: Arc<dyn CollectionProgress> = if cli.quiet || cli.output == OutputFormat::Json {
        Arc::new(NoCollectionProgress)
    } else if cli.verbose > 0 {
        Arc::new(SimpleCollectionProgress)
    } else {
        Arc::new(CollectionProgressReporter::new())
    };

    let job = collector.spawn(input, progress);
    let token = job.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping collection after the current chunk");
            token.cancel();
        }
    });

    let report = job.wait().await?;
    let accepted = ledger.accepted_urls(&job_id);
    println!("{}", formatter.format_report(&report, &accepted));

    Ok(())
}

fn build_planner(config: &FileConfig, force_template: bool) -> Result<Arc<dyn QueryPlanner>> {
    let planner = &config.planner;
    if force_template || planner.kind == PlannerKind::Template {
        return Ok(Arc::new(
            TemplateQueryPlanner::new().with_max_queries(planner.max_queries),
        ));
    }

    let api_key = planner
        .api_key
        .clone()
        .ok_or_else(|| anyhow!("planner.api_key is not set (OPENAI_API_KEY), or use --template-planner"))?;

    Ok(Arc::new(
        LlmQueryPlanner::new(
            api_key,
            &planner.model,
            Duration::from_secs(planner.timeout_seconds),
        )?
        .with_api_base(&planner.api_base)
        .with_diversify_model(planner.diversify_model.clone())
        .with_max_queries(planner.max_queries)
        .with_contact_focus(&planner.contact_focus),
    ))
}

fn build_source(config: &FileConfig) -> Result<Arc<dyn SearchSource>> {
    let search = &config.search;
    let client = GoogleCseClient::new(
        search.api_key.clone().unwrap_or_default(),
        search.engine_id.clone().unwrap_or_default(),
        Duration::from_secs(search.timeout_seconds),
    )?
    .with_base_url(&search.base_url)
    .with_excluded_sites(search.excluded_sites.clone());

    Ok(Arc::new(client))
}

fn build_event_logger(config: &FileConfig) -> Arc<dyn SearchEventLogger> {
    if let Some(path) = &config.logging.events_file
        && let Some(logger) = JsonlEventLogger::new(path)
    {
        info!("Writing search events to {}", logger.path().display());
        return Arc::new(logger);
    }
    Arc::new(NoEventLogger)
}
