//! Reelgraft - Letterboxd export enrichment
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod metadata;
pub mod pipeline;
pub mod table;
