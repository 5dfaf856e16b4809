mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

/// Environment variable holding the TMDB API key.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./reelgraft.toml", "~/.config/reelgraft/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.tmdb.base_url.trim().is_empty() {
        anyhow::bail!("tmdb.base_url cannot be empty");
    }
    if config.tmdb.poster_base_url.trim().is_empty() {
        anyhow::bail!("tmdb.poster_base_url cannot be empty");
    }
    if config.tmdb.timeout_secs == 0 {
        anyhow::bail!("tmdb.timeout_secs must be greater than 0");
    }

    if config.throttle.interval_ms == 0 {
        tracing::warn!("throttle.interval_ms is 0; lookups will run back to back");
    }

    let mut names = HashSet::new();
    for dataset in &config.datasets {
        if !names.insert(dataset.name.as_str()) {
            anyhow::bail!("Dataset '{}' is defined more than once", dataset.name);
        }
        if dataset.input == dataset.output {
            anyhow::bail!(
                "Dataset '{}' would overwrite its own input {:?}",
                dataset.name,
                dataset.input
            );
        }
    }

    Ok(())
}

/// Pick the API key: an explicit value (flag or environment) wins over the
/// config file. Blank keys count as missing.
pub fn resolve_api_key(explicit: Option<&str>, config: &Config) -> Result<String> {
    let usable = |key: &str| !key.trim().is_empty();

    explicit
        .filter(|key| usable(key))
        .or(config.tmdb.api_key.as_deref().filter(|key| usable(key)))
        .map(|key| key.trim().to_string())
        .with_context(|| {
            format!(
                "TMDB API key not found; set {} or tmdb.api_key in the config file",
                API_KEY_ENV
            )
        })
}
