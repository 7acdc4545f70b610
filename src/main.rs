//! scp-freq-search main entry point
//!
//! Command-line front end for the frequency search service. One process holds
//! one `SearchService`; its cache lives only as long as the command runs.

use clap::{Parser, Subcommand};
use scp_freq_search::config::{load_config_with_hash, Config};
use scp_freq_search::output::{render_refresh, render_results, render_status, to_json};
use scp_freq_search::SearchService;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// scp-freq-search: rank wiki articles by how often a query appears in them
///
/// Discovers article links from the configured index pages, politely crawls
/// the articles into memory and scores them by phrase and term frequency.
#[derive(Parser, Debug)]
#[command(name = "scp-freq-search")]
#[command(version)]
#[command(about = "Frequency search over a politely crawled wiki", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the index pages and report the article links found
    Discover {
        /// Print every link, not just the count
        #[arg(long)]
        show: bool,
    },

    /// Discover links and crawl up to MAX_PAGES articles
    Refresh {
        /// Number of articles to crawl
        #[arg(long, default_value_t = 200)]
        max_pages: usize,

        /// Abort the crawl after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Re-fetch the index pages even if links are already known
        #[arg(long)]
        force_discovery: bool,
    },

    /// Rank cached articles against a query
    Search {
        /// Free-text query
        query: String,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,

        /// Crawl this many articles first instead of the default bootstrap
        #[arg(long)]
        max_pages: Option<usize>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the index status
    Status {
        /// Print status as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((config, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    config
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    let service = SearchService::new(config)?;

    match cli.command {
        Command::Discover { show } => handle_discover(&service, show).await,
        Command::Refresh {
            max_pages,
            timeout_secs,
            force_discovery,
        } => handle_refresh(&service, max_pages, timeout_secs, force_discovery).await,
        Command::Search {
            query,
            limit,
            max_pages,
            json,
        } => handle_search(&service, &query, limit, max_pages, json).await,
        Command::Status { json } => handle_status(&service, json),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("scp_freq_search=info,warn"),
            1 => EnvFilter::new("scp_freq_search=debug,info"),
            2 => EnvFilter::new("scp_freq_search=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn handle_discover(
    service: &SearchService,
    show: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let links = service.discover_links(false).await;
    println!("Discovered {} article links", links.len());
    if show {
        for link in links.iter() {
            println!("  {}", link);
        }
    }
    Ok(())
}

async fn handle_refresh(
    service: &SearchService,
    max_pages: usize,
    timeout_secs: Option<u64>,
    force_discovery: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let summary = match timeout_secs {
        Some(secs) => {
            service
                .refresh_with_timeout(max_pages, force_discovery, Duration::from_secs(secs))
                .await?
        }
        None => service.refresh(max_pages, force_discovery).await?,
    };
    print!("{}", render_refresh(&summary));
    Ok(())
}

async fn handle_search(
    service: &SearchService,
    query: &str,
    limit: Option<usize>,
    max_pages: Option<usize>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(max_pages) = max_pages {
        let summary = service.refresh(max_pages, false).await?;
        tracing::info!(
            "Pre-search refresh: {} pages cached from {} links",
            summary.pages_cached,
            summary.seed_links
        );
    }

    let results = service.search(query, limit).await?;
    if json {
        println!("{}", to_json(&results)?);
    } else {
        print!("{}", render_results(query, &results));
    }
    Ok(())
}

fn handle_status(service: &SearchService, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let status = service.status();
    if json {
        println!("{}", to_json(&status)?);
    } else {
        print!("{}", render_status(&status));
    }
    Ok(())
}
