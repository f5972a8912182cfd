//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 endpoints
//! and retrieves movie lists, movie details, and movie videos.

mod api;
mod client;
/// Image and video URL helpers.
pub mod images;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    DiscoverMovieParams, SearchMovieParams, TmdbErrorResponse, TmdbGenre, TmdbMovieDetails,
    TmdbMovieListResponse, TmdbMovieSummary, TmdbProductionCompany, TmdbProductionCountry,
    TmdbSpokenLanguage, TmdbVideo, TmdbVideoList,
};
