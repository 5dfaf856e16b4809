//! Trait definition and types for metadata providers.
//!
//! This module defines the [`MetadataProvider`] trait that the remote movie
//! database must implement, along with the data types its three operations
//! return. Only the fields the enrichment columns need are modelled.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::LookupError;

/// Provider-specific movie identifier (TMDB numeric ID).
pub type MovieId = u64;

// ---------------------------------------------------------------------------
// Search results
// ---------------------------------------------------------------------------

/// A single candidate returned from a title/year search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieMatch {
    pub id: MovieId,
    /// Display title of the candidate, if the provider sent one.
    pub title: Option<String>,
}

// ---------------------------------------------------------------------------
// Credits
// ---------------------------------------------------------------------------

/// A cast entry, in billing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
}

/// A crew entry. `job` is the provider's role label, e.g. `"Director"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    pub name: String,
    pub job: String,
}

/// Cast and crew for a movie, in the order the provider returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieCredits {
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
}

// ---------------------------------------------------------------------------
// Details
// ---------------------------------------------------------------------------

/// Full movie record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    /// Genre labels (e.g. "Drama", "Science Fiction").
    pub genres: Vec<String>,
    /// Path fragment such as `/abc.jpg`; combined with a base URL by the caller.
    pub poster_path: Option<String>,
    /// Production country names.
    pub production_countries: Vec<String>,
    pub runtime: Option<u32>,
    pub original_language: Option<String>,
    pub vote_average: Option<f64>,
    pub popularity: Option<f64>,
    pub revenue: Option<u64>,
    pub budget: Option<u64>,
    pub tagline: Option<String>,
}

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// Async trait the remote movie database must implement.
///
/// Implementations report every failure as a [`LookupError`]; deciding what
/// to do about it is the caller's job.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Short, lowercase identifier for this provider (e.g. `"tmdb"`).
    fn name(&self) -> &'static str;

    /// Search for movies matching `title` released in `year`.
    ///
    /// Candidates are returned in the provider's own ranking order.
    async fn search_movie(&self, title: &str, year: &str) -> Result<Vec<MovieMatch>, LookupError>;

    /// Fetch cast and crew for the movie identified by `id`.
    async fn movie_credits(&self, id: MovieId) -> Result<MovieCredits, LookupError>;

    /// Fetch the full record for the movie identified by `id`.
    async fn movie_details(&self, id: MovieId) -> Result<MovieDetails, LookupError>;
}
