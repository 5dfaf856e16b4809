mod cli;

use reelgraft::config::{self, Config};
use reelgraft::metadata::providers::TmdbProvider;
use reelgraft::metadata::{MetadataClient, RequestThrottle};
use reelgraft::pipeline::{run_datasets, EnrichmentPipeline};
use reelgraft_common::canonical_year;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::sync::Arc;

fn main() -> Result<()> {
    // A `.env` file may supply TMDB_API_KEY; real environment variables win
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "reelgraft=debug,reelgraft_common=debug".to_string()
        } else {
            "reelgraft=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = config::load_config_or_default(cli.config.as_deref())?;
    if let Some(interval_ms) = cli.interval_ms {
        config.throttle.interval_ms = interval_ms;
    }

    let progress = !cli.no_progress;
    let api_key = cli.api_key.as_deref();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let api_key = config::resolve_api_key(api_key, &config)?;
            runtime()?.block_on(run_all(config, api_key, progress))
        }
        Commands::Enrich { input, output } => {
            let api_key = config::resolve_api_key(api_key, &config)?;
            runtime()?.block_on(enrich_file(config, api_key, &input, &output, progress))
        }
        Commands::Lookup { title, year } => {
            let api_key = config::resolve_api_key(api_key, &config)?;
            runtime()?.block_on(lookup_movie(config, api_key, &title, &year))
        }
        Commands::CheckConfig => check_config(config, api_key),
    }
}

/// Lookups run strictly one after another, so a single thread is enough.
fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}

fn metadata_client(config: &Config, api_key: String) -> MetadataClient {
    let provider = TmdbProvider::new(api_key, &config.tmdb);
    MetadataClient::new(Arc::new(provider), config.tmdb.poster_base_url.clone())
}

fn build_pipeline(config: &Config, api_key: String, progress: bool) -> EnrichmentPipeline {
    let throttle = RequestThrottle::from_millis(config.throttle.interval_ms);
    EnrichmentPipeline::new(metadata_client(config, api_key), throttle).with_progress_bar(progress)
}

async fn run_all(config: Config, api_key: String, progress: bool) -> Result<()> {
    let pipeline = build_pipeline(&config, api_key, progress);
    let summary = run_datasets(&pipeline, &config.datasets).await;

    for outcome in &summary.outcomes {
        match &outcome.result {
            Ok(report) => println!(
                "{}: {} rows enriched ({} matched, {} not found, {} failed, {} dropped)",
                outcome.name,
                report.rows_enriched,
                report.matched,
                report.not_found,
                report.search_failed,
                report.rows_dropped
            ),
            Err(e) => println!("{}: {}", outcome.name, e),
        }
    }

    println!(
        "Enrichment finished: {} written, {} skipped, {} failed",
        summary.completed(),
        summary.skipped(),
        summary.failed()
    );
    Ok(())
}

async fn enrich_file(
    config: Config,
    api_key: String,
    input: &Path,
    output: &Path,
    progress: bool,
) -> Result<()> {
    let pipeline = build_pipeline(&config, api_key, progress);
    let report = pipeline
        .process(input, output)
        .await
        .with_context(|| format!("Failed to enrich {:?}", input))?;

    println!(
        "Wrote {:?}: {} rows enriched ({} matched, {} not found, {} failed, {} dropped)",
        output,
        report.rows_enriched,
        report.matched,
        report.not_found,
        report.search_failed,
        report.rows_dropped
    );
    Ok(())
}

async fn lookup_movie(config: Config, api_key: String, title: &str, year: &str) -> Result<()> {
    let year = canonical_year(year)?.context("Year cannot be empty")?;
    let client = metadata_client(&config, api_key);

    let fields = client.lookup(title, &year).await;
    println!("{}", serde_json::to_string_pretty(&fields)?);
    Ok(())
}

fn check_config(mut config: Config, api_key: Option<&str>) -> Result<()> {
    config::validate_config(&config)?;

    let key_status = match config::resolve_api_key(api_key, &config) {
        Ok(_) => "set",
        Err(_) => "missing",
    };
    if config.tmdb.api_key.is_some() {
        config.tmdb.api_key = Some("<redacted>".to_string());
    }

    println!("Configuration is valid (API key: {})", key_status);
    println!();
    print!(
        "{}",
        toml::to_string_pretty(&config).context("Failed to serialize config")?
    );
    Ok(())
}
