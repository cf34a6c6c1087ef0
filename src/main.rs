//! Focused Crawler main entry point
//!
//! This is the command-line interface for the focused crawler.

use anyhow::Context;
use clap::Parser;
use focused_crawler::config::{load_config_with_hash, Config, ReportFormat};
use focused_crawler::crawler::{cancel_after, Coordinator};
use focused_crawler::output::{print_statistics, report_sink, write_report, CrawlReport};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Focused Crawler: keyword-driven breadth-first crawling
///
/// Starting from a seed URL, visits pages breadth-first and keeps the ones
/// whose content mentions any of the keywords. Stops after the page budget
/// is spent and writes the matching pages to a report.
#[derive(Parser, Debug)]
#[command(name = "focused-crawler")]
#[command(version)]
#[command(about = "A keyword-focused breadth-first web crawler", long_about = None)]
struct Cli {
    /// Address to start crawling from
    #[arg(value_name = "SEED")]
    seed: Option<String>,

    /// Keyword that makes a page relevant (repeatable, case-insensitive)
    #[arg(short, long = "keyword", value_name = "KEYWORD")]
    keywords: Vec<String>,

    /// Maximum number of pages to process [default: 10]
    #[arg(short = 'n', long)]
    max_pages: Option<usize>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Where to write the report [default: crawler-results.html]
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,

    /// Maximum number of fetches in flight (results are then in completion order)
    #[arg(long)]
    concurrency: Option<usize>,

    /// Stop the crawl after this many seconds, keeping results found so far
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate settings and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    let config = apply_overrides(config, &cli);
    focused_crawler::config::validate(&config).context("invalid settings")?;

    if cli.dry_run {
        handle_dry_run(&config)?;
        return Ok(());
    }

    if let Err(e) = handle_crawl(&config, config_hash.as_deref(), cli.quiet).await {
        tracing::error!("Crawl failed: {:#}", e);
        return Err(e);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("focused_crawler=info,warn"),
            1 => EnvFilter::new("focused_crawler=debug,info"),
            2 => EnvFilter::new("focused_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Layers command-line flags over the file configuration
fn apply_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(seed) = &cli.seed {
        config.focus.seed = Some(seed.clone());
    }
    if !cli.keywords.is_empty() {
        config.focus.keywords = cli.keywords.clone();
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(concurrency) = cli.concurrency {
        config.crawler.max_concurrent_fetches = concurrency;
    }
    if let Some(timeout) = cli.timeout {
        config.crawler.crawl_timeout = Some(timeout);
    }
    if let Some(output) = &cli.output {
        config.output.report_path = output.display().to_string();
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    config
}

/// Handles the --dry-run mode: validates settings and shows what would be crawled
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let (seed, keywords) = config.focus.resolve()?;

    println!("=== Focused Crawler Dry Run ===\n");

    println!("Focus:");
    println!("  Seed: {}", seed);
    println!("  Keywords: {}", keywords.joined());

    println!("\nCrawler Configuration:");
    println!("  Max pages: {}", config.crawler.max_pages);
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!("  Request timeout: {}s", config.crawler.request_timeout);
    match config.crawler.crawl_timeout {
        Some(secs) => println!("  Crawl timeout: {}s", secs),
        None => println!("  Crawl timeout: none"),
    }

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Report: {}", config.output.report_path);
    println!("  Format: {:?}", config.output.format);

    println!("\n✓ Settings are valid");

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: &Config,
    config_hash: Option<&str>,
    quiet: bool,
) -> anyhow::Result<()> {
    let (seed, keywords) = config.focus.resolve()?;

    let mut coordinator = Coordinator::from_config(config)?;
    let token = coordinator.cancellation_token();

    if let Some(secs) = config.crawler.crawl_timeout {
        cancel_after(token.clone(), Duration::from_secs(secs));
    }

    let interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, finishing with results found so far");
            interrupt.cancel();
        }
    });

    let outcome = coordinator
        .run(seed.clone(), &keywords, config.crawler.max_pages)
        .await?;

    let sink = report_sink(&config.output);
    let mut report =
        CrawlReport::new(&outcome.results, &keywords, &seed).with_stats(&outcome.stats);
    if let Some(hash) = config_hash {
        report = report.with_config_hash(hash);
    }
    write_report(sink.as_ref(), &report)
        .with_context(|| format!("failed to write report to {}", sink.destination()))?;

    if !quiet {
        println!();
        print_statistics(&outcome.stats);
        println!(
            "\n✓ {} relevant page(s) saved to {}",
            outcome.results.len(),
            sink.destination()
        );
    }

    Ok(())
}
