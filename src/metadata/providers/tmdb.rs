//! TMDB (The Movie Database) metadata provider.
//!
//! Implements [`MetadataProvider`] by querying the TMDB v3 REST API:
//!
//! - `GET /search/movie?query=..&year=..`
//! - `GET /movie/{id}/credits`
//! - `GET /movie/{id}`
//!
//! Requests carry the API key as a query parameter, time out after the
//! configured number of seconds and are capped at
//! `requests_per_second` across all three endpoints. Nothing is retried: a
//! rejected request is reported as [`LookupError::RateLimited`].

use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::TmdbConfig;
use crate::metadata::error::LookupError;
use crate::metadata::provider::{
    CastMember, CrewMember, MetadataProvider, MovieCredits, MovieDetails, MovieId, MovieMatch,
};

// ---------------------------------------------------------------------------
// TMDB API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse {
    results: Vec<TmdbSearchResult>,
}

#[derive(Debug, Deserialize)]
struct TmdbSearchResult {
    id: u64,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbCredits {
    #[serde(default)]
    cast: Vec<TmdbCast>,
    #[serde(default)]
    crew: Vec<TmdbCrew>,
}

#[derive(Debug, Deserialize)]
struct TmdbCast {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TmdbCrew {
    name: String,
    #[serde(default)]
    job: String,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieDetail {
    #[serde(default)]
    genres: Vec<TmdbNamed>,
    poster_path: Option<String>,
    #[serde(default)]
    production_countries: Vec<TmdbNamed>,
    runtime: Option<u32>,
    original_language: Option<String>,
    vote_average: Option<f64>,
    popularity: Option<f64>,
    revenue: Option<u64>,
    budget: Option<u64>,
    tagline: Option<String>,
}

/// Genres and production countries share the `{ "name": .. }` shape.
#[derive(Debug, Deserialize)]
struct TmdbNamed {
    name: String,
}

impl From<TmdbCredits> for MovieCredits {
    fn from(credits: TmdbCredits) -> Self {
        Self {
            cast: credits
                .cast
                .into_iter()
                .map(|c| CastMember { name: c.name })
                .collect(),
            crew: credits
                .crew
                .into_iter()
                .map(|c| CrewMember {
                    name: c.name,
                    job: c.job,
                })
                .collect(),
        }
    }
}

impl From<TmdbMovieDetail> for MovieDetails {
    fn from(detail: TmdbMovieDetail) -> Self {
        Self {
            genres: detail.genres.into_iter().map(|g| g.name).collect(),
            poster_path: detail.poster_path,
            production_countries: detail
                .production_countries
                .into_iter()
                .map(|c| c.name)
                .collect(),
            runtime: detail.runtime,
            original_language: detail.original_language,
            vote_average: detail.vote_average,
            popularity: detail.popularity,
            revenue: detail.revenue,
            budget: detail.budget,
            tagline: detail.tagline,
        }
    }
}

// ---------------------------------------------------------------------------
// Provider implementation
// ---------------------------------------------------------------------------

/// TMDB metadata provider.
///
/// # Examples
///
/// ```no_run
/// use reelgraft::config::TmdbConfig;
/// use reelgraft::metadata::providers::TmdbProvider;
///
/// let provider = TmdbProvider::new("your-api-key".into(), &TmdbConfig::default());
/// ```
pub struct TmdbProvider {
    client: Client,
    base_url: String,
    api_key: String,
    language: Option<String>,
    rate_limiter: Option<DefaultDirectRateLimiter>,
}

impl TmdbProvider {
    /// Create a provider for `api_key` using the endpoint, language, timeout
    /// and request ceiling from `config`. A ceiling of 0 disables it.
    pub fn new(api_key: String, config: &TmdbConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            language: config.language.clone(),
            rate_limiter: NonZeroU32::new(config.requests_per_second)
                .map(|rps| RateLimiter::direct(Quota::per_second(rps))),
        }
    }

    /// Execute a GET request and decode the JSON body.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        extra_params: &[(&str, &str)],
    ) -> Result<T, LookupError> {
        let url = format!("{}{path}", self.base_url);
        let mut params: Vec<(&str, &str)> = vec![("api_key", self.api_key.as_str())];
        if let Some(ref language) = self.language {
            params.push(("language", language.as_str()));
        }
        params.extend_from_slice(extra_params);

        if let Some(ref limiter) = self.rate_limiter {
            limiter.until_ready().await;
        }

        // Errors are stripped of their URL so the API key never reaches the logs.
        let resp = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| LookupError::transport(e.without_url().to_string()))?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(LookupError::RateLimited);
        }
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        resp.json::<T>().await.map_err(|e| {
            let e = e.without_url();
            if e.is_decode() {
                LookupError::decode(e.to_string())
            } else {
                LookupError::transport(e.to_string())
            }
        })
    }
}

#[async_trait]
impl MetadataProvider for TmdbProvider {
    fn name(&self) -> &'static str {
        "tmdb"
    }

    async fn search_movie(&self, title: &str, year: &str) -> Result<Vec<MovieMatch>, LookupError> {
        debug!(title, year, "TMDB search movie");
        let body: TmdbSearchResponse = self
            .get("/search/movie", &[("query", title), ("year", year)])
            .await?;

        Ok(body
            .results
            .into_iter()
            .map(|r| MovieMatch {
                id: r.id,
                title: r.title,
            })
            .collect())
    }

    async fn movie_credits(&self, id: MovieId) -> Result<MovieCredits, LookupError> {
        debug!(id, "TMDB get movie credits");
        let credits: TmdbCredits = self.get(&format!("/movie/{id}/credits"), &[]).await?;
        Ok(credits.into())
    }

    async fn movie_details(&self, id: MovieId) -> Result<MovieDetails, LookupError> {
        debug!(id, "TMDB get movie details");
        let detail: TmdbMovieDetail = self.get(&format!("/movie/{id}"), &[]).await?;
        Ok(detail.into())
    }
}
