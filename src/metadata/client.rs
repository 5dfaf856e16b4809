//! Resilient per-movie lookup.
//!
//! [`MetadataClient`] turns a title and year into a full [`EnrichmentFields`]
//! value by running search, credits and details against a
//! [`MetadataProvider`]. Each provider call returns a `Result`; failures are
//! logged and collected into a [`LookupReport`], and only the fields they
//! would have filled stay empty. No error escapes [`MetadataClient::lookup`].

use std::sync::Arc;

use reelgraft_common::EnrichmentFields;
use tracing::{debug, warn};

use super::error::{LookupError, LookupPhase};
use super::provider::{MetadataProvider, MovieCredits, MovieDetails, MovieId};

/// Poster size used for the poster URL column.
pub const DEFAULT_POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Number of cast names kept in the top cast column.
const TOP_CAST_LIMIT: usize = 3;

/// Crew job that marks a director. Matched exactly, so "Co-Director" is not one.
const DIRECTOR_JOB: &str = "Director";

/// How far a lookup got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The search found a candidate; credits and details were attempted.
    Matched { id: MovieId },
    /// The search succeeded with zero candidates.
    NotFound,
    /// The search call itself failed.
    SearchFailed,
}

/// A provider call that failed during a lookup.
#[derive(Debug)]
pub struct PhaseFailure {
    pub phase: LookupPhase,
    pub error: LookupError,
}

/// Result of one lookup, including whatever went wrong along the way.
#[derive(Debug)]
pub struct LookupReport {
    pub fields: EnrichmentFields,
    pub outcome: LookupOutcome,
    pub failures: Vec<PhaseFailure>,
}

impl LookupReport {
    fn new(outcome: LookupOutcome) -> Self {
        Self {
            fields: EnrichmentFields::default(),
            outcome,
            failures: Vec::new(),
        }
    }

    /// A match was found but credits or details could not be fetched.
    pub fn is_partial(&self) -> bool {
        matches!(self.outcome, LookupOutcome::Matched { .. }) && !self.failures.is_empty()
    }

    fn record_failure(&mut self, title: &str, year: &str, phase: LookupPhase, error: LookupError) {
        warn!(title, year, phase = %phase, error = %error, "Metadata lookup step failed");
        self.failures.push(PhaseFailure { phase, error });
    }
}

/// Looks up one movie at a time against a [`MetadataProvider`].
///
/// # Example
///
/// ```rust,ignore
/// let client = MetadataClient::new(Arc::new(provider), DEFAULT_POSTER_BASE_URL);
/// let fields = client.lookup("Arrival", "2016").await;
/// ```
pub struct MetadataClient {
    provider: Arc<dyn MetadataProvider>,
    poster_base_url: String,
}

impl MetadataClient {
    pub fn new(provider: Arc<dyn MetadataProvider>, poster_base_url: impl Into<String>) -> Self {
        Self {
            provider,
            poster_base_url: poster_base_url.into(),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Fetch the enrichment fields for `title` released in `year`.
    ///
    /// Always returns a complete value; anything that could not be fetched is
    /// left as `None`.
    pub async fn lookup(&self, title: &str, year: &str) -> EnrichmentFields {
        self.lookup_with_report(title, year).await.fields
    }

    /// Same as [`lookup`](Self::lookup), keeping the outcome and the errors.
    ///
    /// Credits and details are independent: a credits failure does not stop
    /// the details fetch, and a details failure keeps cast and director.
    pub async fn lookup_with_report(&self, title: &str, year: &str) -> LookupReport {
        let id = match self.provider.search_movie(title, year).await {
            Ok(matches) => match matches.first() {
                Some(first) => first.id,
                None => {
                    debug!(title, year, "No metadata match found");
                    return LookupReport::new(LookupOutcome::NotFound);
                }
            },
            Err(error) => {
                let mut report = LookupReport::new(LookupOutcome::SearchFailed);
                report.record_failure(title, year, LookupPhase::Search, error);
                return report;
            }
        };

        debug!(title, year, id, "Resolved metadata match");
        let mut report = LookupReport::new(LookupOutcome::Matched { id });

        match self.provider.movie_credits(id).await {
            Ok(credits) => apply_credits(&mut report.fields, credits),
            Err(error) => report.record_failure(title, year, LookupPhase::Credits, error),
        }

        match self.provider.movie_details(id).await {
            Ok(details) => apply_details(&mut report.fields, details, &self.poster_base_url),
            Err(error) => report.record_failure(title, year, LookupPhase::Details, error),
        }

        report
    }
}

fn apply_credits(fields: &mut EnrichmentFields, credits: MovieCredits) {
    let cast: Vec<String> = credits
        .cast
        .into_iter()
        .take(TOP_CAST_LIMIT)
        .map(|c| c.name)
        .collect();
    fields.top_cast = Some(cast.join(", "));

    // First listed director wins.
    fields.director = credits
        .crew
        .into_iter()
        .find(|c| c.job == DIRECTOR_JOB)
        .map(|c| c.name);
}

fn apply_details(fields: &mut EnrichmentFields, details: MovieDetails, poster_base_url: &str) {
    fields.genres = Some(details.genres.join(", "));
    fields.poster_url = details
        .poster_path
        .filter(|p| !p.is_empty())
        .map(|p| format!("{poster_base_url}{p}"));
    fields.countries = Some(details.production_countries.join(", "));
    fields.runtime_minutes = details.runtime;
    fields.original_language = details.original_language;
    fields.vote_average = details.vote_average;
    fields.popularity = details.popularity;
    fields.revenue = details.revenue;
    fields.budget = details.budget;
    fields.tagline = details.tagline;
}
