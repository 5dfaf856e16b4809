use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::metadata::DEFAULT_POSTER_BASE_URL;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,

    #[serde(default)]
    pub throttle: ThrottleConfig,

    #[serde(default = "default_datasets")]
    pub datasets: Vec<DatasetConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb: TmdbConfig::default(),
            throttle: ThrottleConfig::default(),
            datasets: default_datasets(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    /// API key; `TMDB_API_KEY` or `--api-key` take precedence
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Prefix joined with the poster path returned by TMDB
    #[serde(default = "default_poster_base_url")]
    pub poster_base_url: String,

    /// Response language such as "en-US" (TMDB default when unset)
    #[serde(default)]
    pub language: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Ceiling on HTTP requests per second across all endpoints (0 = none)
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            poster_base_url: default_poster_base_url(),
            language: None,
            timeout_secs: default_timeout_secs(),
            requests_per_second: default_requests_per_second(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_poster_base_url() -> String {
    DEFAULT_POSTER_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_requests_per_second() -> u32 {
    40
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThrottleConfig {
    /// Pause after each lookup, in milliseconds (default: 100)
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

fn default_interval_ms() -> u64 {
    100
}

/// A named input/output file pair.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DatasetConfig {
    pub name: String,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl DatasetConfig {
    pub fn new(name: impl Into<String>, input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
            output: output.into(),
        }
    }
}

fn default_datasets() -> Vec<DatasetConfig> {
    vec![
        DatasetConfig::new("watched", "watched.csv", "watched_enriched.csv"),
        DatasetConfig::new("watchlist", "watchlist.csv", "watchlist_enriched.csv"),
    ]
}
