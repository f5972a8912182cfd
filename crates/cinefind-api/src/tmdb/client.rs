//! `TmdbClient` - TMDB API client implementation.

use anyhow::{Context, Result, bail};
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderValue};
use tracing::instrument;
use url::Url;

use super::api::TmdbApi;
use super::types::{
    DiscoverMovieParams, SearchMovieParams, TmdbErrorResponse, TmdbMovieDetails,
    TmdbMovieListResponse, TmdbVideoList,
};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// TMDB API client.
///
/// Every request carries `Authorization: Bearer {api_token}`. The client
/// never retries: each call maps to exactly one HTTP request.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Bearer API token.
    api_token: String,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    user_agent: Option<String>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API bearer token (required, may be empty).
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_token` is not set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_token = self.api_token.context("api_token is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let mut default_headers = reqwest::header::HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .default_headers(default_headers)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_token,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Sends a GET request with Bearer auth and query params.
    #[instrument(skip_all, fields(path = %path))]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let request = self
            .http_client
            .get(url)
            .bearer_auth(&self.api_token)
            .query(query)
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        tracing::debug!(url = %request.url(), "TMDB API request");

        let result = self.http_client.execute(request).await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            if let Ok(error_response) = serde_json::from_str::<TmdbErrorResponse>(&body) {
                bail!(
                    "TMDB API error (HTTP {}): code={}, message={}",
                    status,
                    error_response.status_code,
                    error_response.status_message,
                );
            }
            bail!("TMDB API error (HTTP {status}): {body}");
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;
        let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
        raw_result.with_context(|| format!("failed to decode JSON response: {path}"))
    }
}

impl TmdbApi for TmdbClient {
    #[instrument(skip_all)]
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbMovieListResponse> {
        let query = [
            ("query", params.query.clone()),
            ("language", params.language.clone()),
            ("page", params.page.to_string()),
            ("include_adult", params.include_adult.to_string()),
        ];
        self.get_json("search/movie", &query).await
    }

    #[instrument(skip_all)]
    async fn discover_movie(
        &self,
        params: &DiscoverMovieParams,
    ) -> Result<TmdbMovieListResponse> {
        let query: [(&str, String); 4] = [
            ("sort_by", params.sort_by.clone()),
            ("language", params.language.clone()),
            ("page", params.page.to_string()),
            ("include_adult", params.include_adult.to_string()),
        ];

        self.get_json("discover/movie", &query).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn movie_details(&self, movie_id: u64, language: &str) -> Result<TmdbMovieDetails> {
        let path = format!("movie/{movie_id}");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn movie_videos(&self, movie_id: u64) -> Result<TmdbVideoList> {
        let path = format!("movie/{movie_id}/videos");
        self.get_json(&path, &[]).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    fn mock_client(mock_server: &wiremock::MockServer, token: &str) -> TmdbClient {
        let base_url = format!("{}/3/", mock_server.uri());
        TmdbClient::builder()
            .base_url(base_url.parse().unwrap())
            .api_token(token)
            .user_agent("test/0.0.0")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_api_token() {
        // Arrange & Act
        let result = TmdbClient::builder().user_agent("test/0.0.0").build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("api_token is required")
        );
    }

    #[test]
    fn test_builder_requires_user_agent() {
        // Arrange & Act
        let result = TmdbClient::builder().api_token("test-token").build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("user_agent is required")
        );
    }

    #[test]
    fn test_builder_with_custom_base_url() {
        // Arrange
        let custom_url = Url::parse("http://localhost:8080/3/").unwrap();

        // Act
        let client = TmdbClient::builder()
            .base_url(custom_url.clone())
            .api_token("test-token")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Assert
        assert_eq!(client.base_url, custom_url);
        assert_eq!(client.base_url.as_str(), "http://localhost:8080/3/");
    }

    #[test]
    fn test_parse_discover_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/discover_movie_popular.json");

        // Act
        let response: TmdbMovieListResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert!(!response.is_failure());
        assert_eq!(response.results.unwrap().len(), 20);
    }

    #[test]
    fn test_parse_failure_envelope() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/movie_list_failure.json");

        // Act
        let response: TmdbMovieListResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert!(response.is_failure());
        assert_eq!(response.error.as_deref(), Some("Movie not found!"));
        assert_eq!(response.results.unwrap().len(), 1);
    }

    #[test]
    fn test_parse_failure_envelope_without_results() {
        // Arrange
        let json = r#"{"Response":"False","Error":"Too many results."}"#;

        // Act
        let response: TmdbMovieListResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert!(response.is_failure());
        assert!(response.results.is_none());
    }

    #[test]
    fn test_parse_movie_details_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/movie_details_155.json");

        // Act
        let details: TmdbMovieDetails = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(details.id, 155);
        assert_eq!(details.title, "The Dark Knight");
        assert_eq!(details.runtime, Some(152));
        assert_eq!(details.genres.len(), 4);
        assert_eq!(details.spoken_languages[1].english_name, "Mandarin");
        assert_eq!(details.budget, 185_000_000);
    }

    #[test]
    fn test_parse_movie_details_missing_genres_fails() {
        // Arrange
        let json = r#"{"id":155,"title":"The Dark Knight","budget":0,"revenue":0,
            "production_countries":[],"spoken_languages":[],"production_companies":[]}"#;

        // Act
        let result = serde_json::from_str::<TmdbMovieDetails>(json);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_first_youtube_trailer_in_list_order() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/movie_videos_155.json");
        let videos: TmdbVideoList = serde_json::from_str(json).unwrap();

        // Act
        let trailer = videos.first_youtube_trailer().unwrap();

        // Assert: the Featurette and the Vimeo trailer are skipped
        assert_eq!(trailer.key, "EXeTwQWrcwY");
    }

    #[test]
    fn test_unknown_movie_error_body_parses() {
        // Arrange
        let json = r#"{"success":false,"status_code":34,"status_message":"The resource you requested could not be found."}"#;

        // Act
        let error: TmdbErrorResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(error.status_code, 34);
        assert!(!error.success);
        assert!(error.status_message.starts_with("The resource"));
    }

    #[tokio::test]
    async fn test_search_movie_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/search_movie_batman.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/search/movie"))
            .and(wiremock::matchers::query_param("query", "batman"))
            .and(wiremock::matchers::query_param("include_adult", "false"))
            .and(wiremock::matchers::query_param_is_missing("year"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server, "test-token");
        let params = SearchMovieParams::new("batman");

        // Act
        let response = client.search_movie(&params).await.unwrap();

        // Assert
        let results = response.results.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Batman");
    }

    #[tokio::test]
    async fn test_search_movie_encodes_query() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/search_movie_empty.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/search/movie"))
            .and(wiremock::matchers::query_param("query", "Amélie & friends"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server, "test-token");
        let params = SearchMovieParams::new("Amélie & friends");

        // Act
        let response = client.search_movie(&params).await.unwrap();

        // Assert
        assert!(response.results.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_discover_movie_sorts_by_popularity() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/discover_movie_popular.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/discover/movie"))
            .and(wiremock::matchers::query_param("sort_by", "popularity.desc"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server, "test-token");

        // Act
        let response = client
            .discover_movie(&DiscoverMovieParams::popular())
            .await
            .unwrap();

        // Assert
        assert_eq!(response.results.unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_movie_details_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/movie_details_155.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/movie/155"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server, "test-token");

        // Act
        let details = client.movie_details(155, "en-US").await.unwrap();

        // Assert
        assert_eq!(details.id, 155);
        assert_eq!(details.title, "The Dark Knight");
    }

    #[tokio::test]
    async fn test_movie_videos_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/movie_videos_155.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/movie/155/videos"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server, "test-token");

        // Act
        let videos = client.movie_videos(155).await.unwrap();

        // Assert
        assert_eq!(videos.id, 155);
        assert_eq!(videos.results.len(), 4);
    }

    #[tokio::test]
    async fn test_bearer_token_and_accept_header_are_sent() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/search_movie_empty.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::header(
                "Authorization",
                "Bearer my-secret-token",
            ))
            .and(wiremock::matchers::header("accept", "application/json"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server, "my-secret-token");
        let params = SearchMovieParams::new("test");

        // Act & Assert (mock expect(1) verifies the headers)
        client.search_movie(&params).await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_token_surfaces_authentication_failure() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let denied = r#"{"success":false,"status_code":3,"status_message":"Authentication failed: You do not have permissions to access the service."}"#;
        wiremock::Mock::given(wiremock::matchers::path("/3/discover/movie"))
            .respond_with(wiremock::ResponseTemplate::new(401).set_body_string(denied))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = mock_client(&mock_server, "");

        // Act
        let err = client
            .discover_movie(&DiscoverMovieParams::popular())
            .await
            .unwrap_err()
            .to_string();

        // Assert
        assert!(err.contains("HTTP 401"));
        assert!(err.contains("code=3"));
        assert!(err.contains("Authentication failed"));
    }

    #[tokio::test]
    async fn test_unknown_movie_is_an_error() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::path("/3/movie/999999999"))
            .respond_with(wiremock::ResponseTemplate::new(404).set_body_string(
                r#"{"success":false,"status_code":34,"status_message":"The resource you requested could not be found."}"#,
            ))
            .mount(&mock_server)
            .await;
        let client = mock_client(&mock_server, "test-token");

        // Act
        let result = client.movie_details(999_999_999, "en-US").await;

        // Assert
        assert!(result.unwrap_err().to_string().contains("could not be found"));
    }

    #[tokio::test]
    async fn test_http_429_is_not_retried() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let error_body = r#"{"status_code":25,"status_message":"Your request count is over the allowed limit.","success":false}"#;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(429).set_body_string(error_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server, "test-token");

        // Act
        let result = client.movie_details(155, "en-US").await;

        // Assert
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("HTTP 429"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server, "test-token");

        // Act
        let result = client.movie_videos(155).await;

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("failed to decode JSON response")
        );
    }
}
