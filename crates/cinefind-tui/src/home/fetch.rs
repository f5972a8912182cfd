//! List fetch pipeline for the search/list view.

use cinefind_api::tmdb::{DiscoverMovieParams, SearchMovieParams, TmdbApi, TmdbMovieListResponse};
use tracing::instrument;

use super::state::MovieSummary;
use crate::search_log::{SearchLog, log_search_quietly};

/// Message shown for transport, status and decode failures.
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching movies. Please try again later.";

/// Message shown when the upstream failure flag carries no message.
pub const UPSTREAM_FAILURE_DEFAULT: &str = "Failed to fetch movies";

/// Outcome of one list fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum MovieFetch {
    /// A payload arrived. `error` is set when the upstream flagged a failure;
    /// the list is replaced regardless.
    Loaded {
        /// Replacement result list.
        movies: Vec<MovieSummary>,
        /// Upstream-reported failure message.
        error: Option<String>,
    },
    /// The request failed before a usable payload arrived.
    Failed,
}

impl MovieFetch {
    /// Builds the outcome from a decoded list response.
    #[must_use]
    pub fn from_response(resp: &TmdbMovieListResponse) -> Self {
        let error = resp.is_failure().then(|| {
            resp.error
                .clone()
                .filter(|msg| !msg.is_empty())
                .unwrap_or_else(|| String::from(UPSTREAM_FAILURE_DEFAULT))
        });
        let movies = resp
            .results
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(MovieSummary::from)
            .collect();
        Self::Loaded { movies, error }
    }

    /// Returns the first result of a loaded list.
    #[must_use]
    pub fn top_result(&self) -> Option<&MovieSummary> {
        match self {
            Self::Loaded { movies, .. } => movies.first(),
            Self::Failed => None,
        }
    }
}

/// Fetches the result list for a committed query.
///
/// A non-empty query searches by title; an empty one lists popular movies.
/// Never fails: every error collapses into [`MovieFetch::Failed`].
#[instrument(skip_all, fields(query = query))]
pub async fn fetch_movies<A: TmdbApi>(api: &A, query: &str, language: &str) -> MovieFetch {
    let result = if query.is_empty() {
        api.discover_movie(&DiscoverMovieParams::popular().language(language))
            .await
    } else {
        api.search_movie(&SearchMovieParams::new(query).language(language))
            .await
    };

    match result {
        Ok(resp) => {
            let fetch = MovieFetch::from_response(&resp);
            if let MovieFetch::Loaded { movies, error } = &fetch {
                tracing::debug!(count = movies.len(), upstream_error = ?error, "Fetched movies");
            }
            fetch
        }
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Error fetching movies");
            MovieFetch::Failed
        }
    }
}

/// Fetches the list, hands it to `deliver`, then reports the search.
///
/// The search log is consulted exactly once, with the query and its top
/// result, when the query is non-empty and the list is non-empty. Its
/// failures never reach `deliver`.
pub async fn fetch_movies_and_log<A, L, F>(
    api: &A,
    log: &L,
    query: &str,
    language: &str,
    deliver: F,
) where
    A: TmdbApi,
    L: SearchLog,
    F: FnOnce(MovieFetch),
{
    let fetch = fetch_movies(api, query, language).await;
    let top = if query.is_empty() {
        None
    } else {
        fetch.top_result().cloned()
    };
    deliver(fetch);

    if let Some(movie) = top {
        log_search_quietly(log, query, &movie).await;
    }
}
