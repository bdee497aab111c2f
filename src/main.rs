//! Automobile main entry point
//!
//! This is the command-line interface that turns a list of article URLs into
//! an offline e-book.

use automobile::config::{load_config_with_hash, resolve_cache_path, Config};
use automobile::package::{assemble, CommandConverter};
use automobile::pipeline::{build_article_list, read_pocket_export, read_url_list};
use automobile::{canonicalize, ArticleCache, ReadabilityFetcher, Sanitizer};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Automobile: article URLs in, e-book out
///
/// Each URL is run through a content-extraction service, sanitized, cached,
/// and bound as one chapter of a magazine. The most recently added URL (the
/// last line of the file) becomes the first chapter.
#[derive(Parser, Debug)]
#[command(name = "automobile")]
#[command(version)]
#[command(about = "Turns a list of article URLs into an offline e-book", long_about = None)]
struct Cli {
    /// File with one URL per line
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Magazine title; also names the output file
    #[arg(short, long)]
    title: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Extraction service token (overrides the config file)
    #[arg(long)]
    token: Option<String>,

    /// Article cache file (overrides the config file)
    #[arg(long, value_name = "PATH")]
    cache: Option<PathBuf>,

    /// Read FILE as a Pocket HTML export instead of a plain URL list
    #[arg(long)]
    pocket_export: bool,

    /// Show which URLs are cached without fetching or writing anything
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    if let Some(token) = &cli.token {
        config.extraction.token = token.clone();
    }

    let urls = if cli.pocket_export {
        read_pocket_export(&cli.file)?
    } else {
        read_url_list(&cli.file)?
    };
    tracing::info!("Read {} URLs from {}", urls.len(), cli.file.display());

    let cache_path = cli
        .cache
        .clone()
        .unwrap_or_else(|| resolve_cache_path(&config.cache));
    let cache = ArticleCache::load(&cache_path)?;

    if cli.dry_run {
        handle_dry_run(&urls, &cache);
        return Ok(());
    }

    match handle_build(&cli, &config, &urls, cache).await {
        Ok(output) => {
            println!("{}", output.display());
            Ok(())
        }
        Err(e) => {
            tracing::error!("Build failed: {}", e);
            Err(e)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("automobile=info,warn"),
            1 => EnvFilter::new("automobile=debug,info"),
            2 => EnvFilter::new("automobile=trace,debug"),
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

/// Handles the --dry-run mode: reports the cache status of every URL
fn handle_dry_run(urls: &[String], cache: &ArticleCache) {
    println!("=== Automobile Dry Run ===\n");
    println!("Cache: {} ({} articles)\n", cache.path().display(), cache.len());

    let mut missing = 0;
    // chapter order: bottom of the file first
    for url in urls.iter().rev() {
        let canonical = canonicalize(url);
        if cache.contains(&canonical) {
            println!("  cached   {}", canonical);
        } else {
            missing += 1;
            println!("  missing  {}", canonical);
        }
    }

    println!(
        "\nWould fetch {} of {} URLs",
        missing,
        urls.len()
    );
}

/// Handles a normal run: resolve every article, then assemble and convert
async fn handle_build(
    cli: &Cli,
    config: &Config,
    urls: &[String],
    mut cache: ArticleCache,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let fetcher = ReadabilityFetcher::new(
        &config.extraction,
        Sanitizer::from_config(&config.sanitizer),
    )?;

    let articles = build_article_list(urls, &mut cache, &fetcher).await?;
    tracing::info!("Resolved {} articles", articles.len());

    let converter = CommandConverter::from_config(&config.converter);
    let output_dir = std::env::current_dir()?;
    let output = assemble(&articles, cli.title.as_deref(), &converter, &output_dir)?;
    tracing::info!("Wrote {}", output.display());

    Ok(output)
}
