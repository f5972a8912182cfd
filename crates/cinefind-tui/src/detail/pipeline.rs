//! Detail fetch pipeline: metadata, then videos, reshaped into [`MovieDetail`].

use anyhow::{Context, Result};
use cinefind_api::tmdb::images::{backdrop_url, poster_url, youtube_embed_url, youtube_watch_url};
use cinefind_api::tmdb::{TmdbApi, TmdbMovieDetails, TmdbVideoList};
use tracing::instrument;

/// Placeholder shown for an absent or empty tagline.
pub const TAGLINE_PLACEHOLDER: &str = "\u{2014}";

/// Flattened movie metadata ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetail {
    /// TMDB movie ID.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Vote average (nullable).
    pub vote_average: Option<f64>,
    /// Release date (YYYY-MM-DD, nullable).
    pub release_date: Option<String>,
    /// Runtime in minutes (nullable).
    pub runtime: Option<u32>,
    /// Full poster URL (nullable).
    pub poster_url: Option<String>,
    /// Full backdrop URL (nullable).
    pub backdrop_url: Option<String>,
    /// Overview text.
    pub overview: String,
    /// Genre names in upstream order.
    pub genres: Vec<String>,
    /// Production country names.
    pub countries: Vec<String>,
    /// Release status (nullable).
    pub status: Option<String>,
    /// Spoken language names (English).
    pub languages: Vec<String>,
    /// Budget in USD.
    pub budget: u64,
    /// Revenue in USD.
    pub revenue: u64,
    /// Tagline, or [`TAGLINE_PLACEHOLDER`].
    pub tagline: String,
    /// Official homepage (only when non-empty).
    pub homepage: Option<String>,
    /// Production company names.
    pub production_companies: Vec<String>,
    /// YouTube watch URL of the first trailer (nullable).
    pub trailer_url: Option<String>,
}

impl MovieDetail {
    /// Builds the detail from the metadata and video responses.
    #[must_use]
    pub fn from_responses(details: TmdbMovieDetails, videos: &TmdbVideoList) -> Self {
        let trailer_url = videos
            .first_youtube_trailer()
            .map(|video| youtube_watch_url(&video.key));

        Self {
            id: details.id,
            poster_url: poster_url(details.poster_path.as_deref()),
            backdrop_url: backdrop_url(details.backdrop_path.as_deref()),
            title: details.title,
            vote_average: details.vote_average,
            release_date: details.release_date,
            runtime: details.runtime,
            overview: details.overview.unwrap_or_default(),
            genres: details.genres.into_iter().map(|g| g.name).collect(),
            countries: details
                .production_countries
                .into_iter()
                .map(|c| c.name)
                .collect(),
            status: details.status,
            languages: details
                .spoken_languages
                .into_iter()
                .map(|l| l.english_name)
                .collect(),
            budget: details.budget,
            revenue: details.revenue,
            tagline: details
                .tagline
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| String::from(TAGLINE_PLACEHOLDER)),
            homepage: details.homepage.filter(|h| !h.is_empty()),
            production_companies: details
                .production_companies
                .into_iter()
                .map(|p| p.name)
                .collect(),
            trailer_url,
        }
    }

    /// Returns the embeddable trailer URL.
    #[must_use]
    pub fn embed_url(&self) -> Option<String> {
        self.trailer_url.as_deref().map(youtube_embed_url)
    }
}

/// Loads the detail for one movie.
///
/// The videos request is issued only after the metadata request succeeds.
///
/// # Errors
///
/// Returns an error if either request or its decoding fails.
#[instrument(skip_all, fields(movie_id = movie_id))]
pub async fn load_movie_detail<A: TmdbApi>(
    api: &A,
    movie_id: u64,
    language: &str,
) -> Result<MovieDetail> {
    let details = api
        .movie_details(movie_id, language)
        .await
        .with_context(|| format!("failed to fetch details for movie {movie_id}"))?;
    let videos = api
        .movie_videos(movie_id)
        .await
        .with_context(|| format!("failed to fetch videos for movie {movie_id}"))?;

    let detail = MovieDetail::from_responses(details, &videos);
    tracing::debug!(
        title = %detail.title,
        has_trailer = detail.trailer_url.is_some(),
        "Loaded movie detail"
    );
    Ok(detail)
}
