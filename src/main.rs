//! A11y-Scout main entry point
//!
//! Loads a crawl configuration and reports, for each URL given, whether the
//! crawler would admit it to the frontier.

use a11y_scout::config::{load_config_with_hash, Config};
use a11y_scout::crawler::{build_filter, Admission, CrawlFilter, Frontier};
use a11y_scout::robots::RobotsCache;
use anyhow::Context;
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// A11y-Scout: crawl frontier policy checker
///
/// Resolves each URL against the configured base URL and runs it through
/// robots.txt and include/exclude pattern gates, printing the decision.
#[derive(Parser, Debug)]
#[command(name = "a11y-scout")]
#[command(version)]
#[command(about = "Check which links an accessibility crawl would visit", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// URLs or paths to check (read from stdin when omitted)
    #[arg(value_name = "URL")]
    urls: Vec<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and print the crawl policy without checking URLs
    #[arg(long)]
    dry_run: bool,

    /// Do not fetch robots.txt even when the config respects it
    #[arg(long)]
    no_robots: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    if cli.dry_run {
        print_policy(&config);
        return Ok(());
    }

    let mut robots_cache = RobotsCache::new(config.user_agent.crawler_name.clone());
    let cache = (!cli.no_robots).then_some(&mut robots_cache);
    let filter = build_filter(&config, cache)
        .await
        .context("failed to build crawl filter")?;

    let urls = if cli.urls.is_empty() {
        read_stdin_urls()?
    } else {
        cli.urls
    };

    check_urls(&filter, &config, &urls);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("a11y_scout=info,warn"),
            1 => EnvFilter::new("a11y_scout=debug,info"),
            2 => EnvFilter::new("a11y_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn read_stdin_urls() -> anyhow::Result<Vec<String>> {
    let mut urls = Vec::new();
    for line in std::io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            urls.push(trimmed.to_string());
        }
    }
    Ok(urls)
}

/// Prints one decision per URL, deduplicating on the canonical form
fn check_urls(filter: &CrawlFilter, config: &Config, urls: &[String]) {
    let mut frontier = Frontier::new(config.crawler.max_depth, config.crawler.max_pages);
    let mut admitted = 0usize;

    for raw in urls {
        match filter.admit(raw) {
            Admission::Admit(url) => {
                if frontier.contains(&url) {
                    println!("DUPLICATE {}", url);
                } else if frontier.push(url.clone(), 0) {
                    admitted += 1;
                    println!("ADMIT {}", url);
                } else {
                    println!("REJECT page-limit {}", raw);
                }
            }
            Admission::Reject { reason, .. } => println!("REJECT {} {}", reason, raw),
        }
    }

    tracing::info!("{} of {} URLs admitted", admitted, urls.len());
}

/// Handles the --dry-run mode
fn print_policy(config: &Config) {
    println!("=== A11y-Scout Crawl Policy ===\n");
    println!("Base URL: {}", config.site.base_url);
    println!("User agent: {}", config.user_agent.user_agent_string());

    println!("\nCrawler:");
    println!("  Respect robots.txt: {}", config.crawler.respect_robots_txt);
    println!("  Keep query: {}", config.crawler.keep_query);
    println!("  Same origin only: {}", config.crawler.same_origin_only);
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Max pages: {}", config.crawler.max_pages);

    println!("\nInclude patterns ({}):", config.crawler.include_patterns.len());
    for pattern in &config.crawler.include_patterns {
        println!("  - {}", pattern);
    }

    println!("\nExclude patterns ({}):", config.crawler.exclude_patterns.len());
    for pattern in &config.crawler.exclude_patterns {
        println!("  - {}", pattern);
    }

    println!("\n✓ Configuration is valid");
}
