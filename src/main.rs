//! Newsrank main entry point
//!
//! This is the command-line interface for the Newsrank most-liked article ranker.

use anyhow::Context;
use clap::Parser;
use newsrank::config::{load_config_with_hash, validate, Config};
use newsrank::crawler::crawl;
use newsrank::output::{log_statistics, write_ranking};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Newsrank: the most-liked articles of the past week
///
/// Newsrank crawls the category pages of the news site for articles published
/// in a trailing window, looks up the likes of every article's comments and
/// prints the most-liked articles as a JSON array on standard output.
#[derive(Parser, Debug)]
#[command(name = "newsrank")]
#[command(version)]
#[command(about = "Rank a news site's most-liked articles", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Number of articles to print (overrides output.top-n)
    #[arg(long, value_name = "N")]
    top: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(top) = cli.top {
        config.output.top_n = top;
        validate(&config).context("invalid --top")?;
    }

    tracing::info!(
        "Ranking the top {} articles of the last {} days from {}",
        config.output.top_n,
        config.crawler.window_days,
        config.site.base_url
    );

    let report = crawl(config).await.context("crawl failed")?;
    log_statistics(&report.stats);

    write_ranking(std::io::stdout().lock(), &report.articles)
        .context("failed to write ranking to stdout")?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only the JSON ranking.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("newsrank=info,warn"),
            1 => EnvFilter::new("newsrank=debug,info"),
            2 => EnvFilter::new("newsrank=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
