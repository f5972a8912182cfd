//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{
    DiscoverMovieParams, SearchMovieParams, TmdbMovieDetails, TmdbMovieListResponse,
    TmdbVideoList,
};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Searches for movies by title.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbMovieListResponse>;

    /// Lists movies through the discover endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn discover_movie(&self, params: &DiscoverMovieParams)
    -> Result<TmdbMovieListResponse>;

    /// Fetches full movie metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_details(&self, movie_id: u64, language: &str) -> Result<TmdbMovieDetails>;

    /// Fetches the videos attached to a movie (all languages).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_videos(&self, movie_id: u64) -> Result<TmdbVideoList>;
}
