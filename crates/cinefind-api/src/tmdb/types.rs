//! TMDB API response types and request parameters.

use serde::Deserialize;

/// Value of the `Response` envelope field that marks a failed lookup.
const RESPONSE_FAILED: &str = "False";

// --- Movie lists (search / discover) ---

/// Response from the `search/movie` and `discover/movie` endpoints.
///
/// Besides the regular page envelope, the payload may carry a
/// `Response` / `Error` pair reporting a logical failure. `results`
/// is optional because such failure payloads may omit it.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieListResponse {
    /// Current page number.
    #[serde(default)]
    pub page: u32,
    /// Result set (absent on some failure payloads).
    #[serde(default)]
    pub results: Option<Vec<TmdbMovieSummary>>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
    /// Logical status flag (`"False"` on failure).
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    /// Logical failure message.
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl TmdbMovieListResponse {
    /// Returns `true` when the payload carries the explicit failure flag.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.response.as_deref() == Some(RESPONSE_FAILED)
    }
}

/// A single movie entry in a search or discover result set.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: Option<String>,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: Option<String>,
    /// Release date (YYYY-MM-DD, empty or null when unknown).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Vote average.
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

// --- Movie details ---

/// Response from the `movie/{movie_id}` endpoint.
///
/// The nested name lists and the monetary fields are required: a payload
/// missing them is treated as malformed.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Vote average.
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Release date (YYYY-MM-DD).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Genres.
    pub genres: Vec<TmdbGenre>,
    /// Production countries.
    pub production_countries: Vec<TmdbProductionCountry>,
    /// Release status (e.g., "Released").
    #[serde(default)]
    pub status: Option<String>,
    /// Spoken languages.
    pub spoken_languages: Vec<TmdbSpokenLanguage>,
    /// Budget in USD.
    pub budget: u64,
    /// Revenue in USD.
    pub revenue: u64,
    /// Tagline.
    #[serde(default)]
    pub tagline: Option<String>,
    /// Official homepage URL.
    #[serde(default)]
    pub homepage: Option<String>,
    /// Production companies.
    pub production_companies: Vec<TmdbProductionCompany>,
}

/// Genre entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Production country entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbProductionCountry {
    /// Country code (ISO 3166-1).
    pub iso_3166_1: String,
    /// Country name.
    pub name: String,
}

/// Spoken language entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSpokenLanguage {
    /// English name of the language.
    pub english_name: String,
    /// Language code (ISO 639-1).
    pub iso_639_1: String,
    /// Native name of the language.
    #[serde(default)]
    pub name: Option<String>,
}

/// Production company entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbProductionCompany {
    /// Company ID.
    pub id: u64,
    /// Company name.
    pub name: String,
    /// Logo image path.
    #[serde(default)]
    pub logo_path: Option<String>,
    /// Origin country (ISO 3166-1).
    #[serde(default)]
    pub origin_country: Option<String>,
}

// --- Videos ---

/// Response from the `movie/{movie_id}/videos` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideoList {
    /// TMDB movie ID.
    pub id: u64,
    /// Videos in upstream order.
    pub results: Vec<TmdbVideo>,
}

/// A single video attached to a movie.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    /// Video ID.
    pub id: String,
    /// Hosting-site key (YouTube video ID for `site == "YouTube"`).
    pub key: String,
    /// Video name.
    #[serde(default)]
    pub name: String,
    /// Hosting site (e.g., "YouTube", "Vimeo").
    pub site: String,
    /// Video type (e.g., "Trailer", "Teaser", "Featurette").
    #[serde(rename = "type")]
    pub video_type: String,
    /// Whether the video is official.
    #[serde(default)]
    pub official: bool,
    /// Resolution.
    #[serde(default)]
    pub size: u32,
    /// Publication timestamp.
    #[serde(default)]
    pub published_at: Option<String>,
}

impl TmdbVideo {
    /// Returns `true` for a YouTube-hosted trailer.
    #[must_use]
    pub fn is_youtube_trailer(&self) -> bool {
        self.video_type == "Trailer" && self.site == "YouTube"
    }
}

impl TmdbVideoList {
    /// Returns the first YouTube-hosted trailer in list order.
    #[must_use]
    pub fn first_youtube_trailer(&self) -> Option<&TmdbVideo> {
        self.results.iter().find(|v| v.is_youtube_trailer())
    }
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[allow(dead_code)]
    pub success: bool,
}

// --- Request Parameters ---

/// Parameters for the `search/movie` endpoint.
#[derive(Debug, Clone)]
pub struct SearchMovieParams {
    /// Search query (required).
    pub query: String,
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page (default: 1).
    pub page: u32,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchMovieParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: String::from("en-US"),
            page: 1,
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Parameters for the `discover/movie` endpoint.
#[derive(Debug, Clone)]
pub struct DiscoverMovieParams {
    /// Sort order (default: "popularity.desc").
    pub sort_by: String,
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page (default: 1).
    pub page: u32,
    /// Include adult content.
    pub include_adult: bool,
}

impl Default for DiscoverMovieParams {
    fn default() -> Self {
        Self {
            sort_by: String::from("popularity.desc"),
            language: String::from("en-US"),
            page: 1,
            include_adult: false,
        }
    }
}

impl DiscoverMovieParams {
    /// Creates discover params sorted by descending popularity.
    #[must_use]
    pub fn popular() -> Self {
        Self::default()
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}
