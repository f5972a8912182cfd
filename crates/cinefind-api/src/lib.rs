//! API client library for cinefind.
//!
//! Provides the client for the TMDB movie metadata API.

/// TMDB API client.
pub mod tmdb;
