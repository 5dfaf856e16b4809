//! Shared test harness for integration tests.
//!
//! Provides [`StubProvider`], an in-memory [`MetadataProvider`] with canned
//! answers per title, and helpers to build an [`EnrichmentPipeline`] around
//! it without touching the network.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use reelgraft::metadata::{
    CastMember, CrewMember, LookupError, MetadataClient, MetadataProvider, MovieCredits,
    MovieDetails, MovieId, MovieMatch, RequestThrottle, DEFAULT_POSTER_BASE_URL,
};
use reelgraft::pipeline::EnrichmentPipeline;

/// Canned answer for one title.
#[derive(Clone)]
pub enum StubMovie {
    Found {
        id: MovieId,
        credits: MovieCredits,
        details: MovieDetails,
    },
    /// The search call itself fails.
    SearchFails,
}

/// Provider answering from a title map. Unknown titles have no match.
#[derive(Default)]
pub struct StubProvider {
    movies: HashMap<String, StubMovie>,
    search_delay: Duration,
    searches: Mutex<Vec<(String, String)>>,
    search_starts: Mutex<Vec<Instant>>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movie(
        mut self,
        title: &str,
        id: MovieId,
        credits: MovieCredits,
        details: MovieDetails,
    ) -> Self {
        self.movies.insert(
            title.to_string(),
            StubMovie::Found {
                id,
                credits,
                details,
            },
        );
        self
    }

    pub fn with_failing_search(mut self, title: &str) -> Self {
        self.movies
            .insert(title.to_string(), StubMovie::SearchFails);
        self
    }

    /// Make every search take `delay`.
    pub fn with_search_delay(mut self, delay: Duration) -> Self {
        self.search_delay = delay;
        self
    }

    /// When each search started, in call order.
    pub fn search_starts(&self) -> Vec<Instant> {
        self.search_starts.lock().unwrap().clone()
    }

    /// Every `(title, year)` pair searched so far, in call order.
    pub fn searches(&self) -> Vec<(String, String)> {
        self.searches.lock().unwrap().clone()
    }

    fn find(&self, id: MovieId) -> Option<(&MovieCredits, &MovieDetails)> {
        self.movies.values().find_map(|movie| match movie {
            StubMovie::Found {
                id: movie_id,
                credits,
                details,
            } if *movie_id == id => Some((credits, details)),
            _ => None,
        })
    }
}

#[async_trait]
impl MetadataProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn search_movie(&self, title: &str, year: &str) -> Result<Vec<MovieMatch>, LookupError> {
        self.search_starts.lock().unwrap().push(Instant::now());
        if !self.search_delay.is_zero() {
            tokio::time::sleep(self.search_delay).await;
        }
        self.searches
            .lock()
            .unwrap()
            .push((title.to_string(), year.to_string()));

        match self.movies.get(title) {
            Some(StubMovie::Found { id, .. }) => Ok(vec![MovieMatch {
                id: *id,
                title: Some(title.to_string()),
            }]),
            Some(StubMovie::SearchFails) => Err(LookupError::Status {
                status: 500,
                path: "/search/movie".into(),
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn movie_credits(&self, id: MovieId) -> Result<MovieCredits, LookupError> {
        self.find(id)
            .map(|(credits, _)| credits.clone())
            .ok_or(LookupError::Status {
                status: 404,
                path: format!("/movie/{id}/credits"),
            })
    }

    async fn movie_details(&self, id: MovieId) -> Result<MovieDetails, LookupError> {
        self.find(id)
            .map(|(_, details)| details.clone())
            .ok_or(LookupError::Status {
                status: 404,
                path: format!("/movie/{id}"),
            })
    }
}

pub fn arrival_credits() -> MovieCredits {
    MovieCredits {
        cast: ["Amy Adams", "Jeremy Renner", "Forest Whitaker", "Michael Stuhlbarg"]
            .iter()
            .map(|name| CastMember {
                name: name.to_string(),
            })
            .collect(),
        crew: vec![
            CrewMember {
                name: "Bradford Young".into(),
                job: "Director of Photography".into(),
            },
            CrewMember {
                name: "Denis Villeneuve".into(),
                job: "Director".into(),
            },
        ],
    }
}

pub fn arrival_details() -> MovieDetails {
    MovieDetails {
        genres: vec!["Drama".into(), "Science Fiction".into()],
        poster_path: Some("/x2FJsf1ElAgr63Y3PNPtJrcmpoe.jpg".into()),
        production_countries: vec!["United States of America".into()],
        runtime: Some(116),
        original_language: Some("en".into()),
        vote_average: Some(7.6),
        popularity: Some(41.25),
        revenue: Some(203388186),
        budget: Some(47000000),
        tagline: Some("Why are they here?".into()),
    }
}

/// A provider that knows Arrival (id 329865).
pub fn arrival_provider() -> StubProvider {
    StubProvider::new().with_movie("Arrival", 329865, arrival_credits(), arrival_details())
}

/// Pipeline over `provider` with no pacing and no progress bar.
pub fn pipeline(provider: Arc<StubProvider>) -> EnrichmentPipeline {
    let client = MetadataClient::new(provider, DEFAULT_POSTER_BASE_URL);
    EnrichmentPipeline::new(client, RequestThrottle::unlimited())
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Read a CSV file back as `(headers, rows)`.
pub fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader
        .headers()
        .unwrap()
        .iter()
        .map(String::from)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (headers, rows)
}
