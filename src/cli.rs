use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reelgraft")]
#[command(author, version, about = "Enrich Letterboxd exports with TMDB movie metadata")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TMDB API key (overrides the config file)
    #[arg(long, global = true, env = "TMDB_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Minimum milliseconds between two lookups (overrides the config file)
    #[arg(long, global = true)]
    pub interval_ms: Option<u64>,

    /// Do not draw progress bars
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Defaults to `run`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Enrich every configured dataset (watched and watchlist by default)
    Run,

    /// Enrich a single CSV file
    Enrich {
        /// Letterboxd CSV export to read
        #[arg(required = true)]
        input: PathBuf,

        /// Where to write the enriched CSV
        #[arg(required = true)]
        output: PathBuf,
    },

    /// Look up one movie and print its enrichment fields as JSON
    Lookup {
        /// Movie title
        title: String,

        /// Release year
        year: String,
    },

    /// Validate configuration and print the effective settings
    CheckConfig,
}
