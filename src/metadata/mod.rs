//! Movie metadata lookups.
//!
//! # Module layout
//!
//! - [`provider`] -- Trait definition and shared data types for the remote service.
//! - [`providers`] -- Concrete provider implementations (TMDB).
//! - [`client`] -- [`MetadataClient`], the lookup that never fails.
//! - [`throttle`] -- Fixed pause after each lookup.
//! - [`error`] -- Provider call errors and lookup phases.

pub mod client;
pub mod error;
pub mod provider;
pub mod providers;
pub mod throttle;

pub use client::{LookupOutcome, LookupReport, MetadataClient, PhaseFailure, DEFAULT_POSTER_BASE_URL};
pub use error::{LookupError, LookupPhase};
pub use provider::{
    CastMember, CrewMember, MetadataProvider, MovieCredits, MovieDetails, MovieId, MovieMatch,
};
pub use throttle::RequestThrottle;
