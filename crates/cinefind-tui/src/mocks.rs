//! Mock collaborators shared by the view tests.
#![allow(clippy::unwrap_used)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use anyhow::{Result, bail};
use cinefind_api::tmdb::{
    DiscoverMovieParams, SearchMovieParams, TmdbApi, TmdbMovieDetails, TmdbMovieListResponse,
    TmdbVideoList,
};
use cinefind_db::RecordOutcome;

use crate::home::state::MovieSummary;
use crate::search_log::{SearchLog, TrendingEntry};

/// Parses a fixture from `fixtures/tmdb/`.
macro_rules! fixture {
    ($name:literal) => {
        serde_json::from_str(include_str!(concat!("../../../fixtures/tmdb/", $name))).unwrap()
    };
}

/// Mock API returning pre-configured payloads. `None` simulates a network failure.
#[derive(Debug, Default)]
pub struct MockTmdbApi {
    pub search: Option<TmdbMovieListResponse>,
    pub discover: Option<TmdbMovieListResponse>,
    pub details: Option<TmdbMovieDetails>,
    pub videos: Option<TmdbVideoList>,
    pub search_calls: Mutex<Vec<String>>,
    pub discover_calls: AtomicU32,
    pub detail_calls: Mutex<Vec<u64>>,
    pub video_calls: Mutex<Vec<u64>>,
}

impl MockTmdbApi {
    /// Every endpoint fails.
    pub fn offline() -> Self {
        Self::default()
    }

    /// Discover returns 20 popular movies, search returns "Batman",
    /// details and videos describe "The Dark Knight".
    pub fn with_fixtures() -> Self {
        Self {
            search: Some(fixture!("search_movie_batman.json")),
            discover: Some(fixture!("discover_movie_popular.json")),
            details: Some(fixture!("movie_details_155.json")),
            videos: Some(fixture!("movie_videos_155.json")),
            ..Self::default()
        }
    }

    /// Search answers with the upstream failure envelope.
    pub fn with_search_failure_envelope() -> Self {
        Self {
            search: Some(fixture!("movie_list_failure.json")),
            ..Self::with_fixtures()
        }
    }

    /// Search answers with an empty result set.
    pub fn with_empty_search() -> Self {
        Self {
            search: Some(fixture!("search_movie_empty.json")),
            ..Self::with_fixtures()
        }
    }

    /// Videos answer with an empty list.
    pub fn without_trailer() -> Self {
        Self {
            videos: Some(fixture!("movie_videos_empty.json")),
            ..Self::with_fixtures()
        }
    }

    /// Details succeed but the videos call fails.
    pub fn with_failing_videos() -> Self {
        Self {
            videos: None,
            ..Self::with_fixtures()
        }
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn discover_calls(&self) -> u32 {
        self.discover_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> Vec<u64> {
        self.detail_calls.lock().unwrap().clone()
    }

    pub fn video_calls(&self) -> Vec<u64> {
        self.video_calls.lock().unwrap().clone()
    }
}

impl TmdbApi for MockTmdbApi {
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbMovieListResponse> {
        self.search_calls.lock().unwrap().push(params.query.clone());
        match &self.search {
            Some(resp) => Ok(resp.clone()),
            None => bail!("connection refused"),
        }
    }

    async fn discover_movie(&self, _params: &DiscoverMovieParams) -> Result<TmdbMovieListResponse> {
        self.discover_calls.fetch_add(1, Ordering::SeqCst);
        match &self.discover {
            Some(resp) => Ok(resp.clone()),
            None => bail!("connection refused"),
        }
    }

    async fn movie_details(&self, movie_id: u64, _language: &str) -> Result<TmdbMovieDetails> {
        self.detail_calls.lock().unwrap().push(movie_id);
        match &self.details {
            Some(details) => Ok(details.clone()),
            None => bail!("connection refused"),
        }
    }

    async fn movie_videos(&self, movie_id: u64) -> Result<TmdbVideoList> {
        self.video_calls.lock().unwrap().push(movie_id);
        match &self.videos {
            Some(videos) => Ok(videos.clone()),
            None => bail!("connection refused"),
        }
    }
}

/// Mock search log that records every call and optionally fails.
#[derive(Debug, Default)]
pub struct MockSearchLog {
    pub calls: Mutex<Vec<(String, u64)>>,
    pub trending: Vec<TrendingEntry>,
    pub fail: bool,
}

impl MockSearchLog {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, u64)> {
        self.calls.lock().unwrap().clone()
    }
}

impl SearchLog for MockSearchLog {
    async fn record_search(&self, query: &str, movie: &MovieSummary) -> Result<RecordOutcome> {
        self.calls
            .lock()
            .unwrap()
            .push((String::from(query), movie.id));
        if self.fail {
            bail!("search log unavailable");
        }
        Ok(RecordOutcome::Inserted)
    }

    async fn trending(&self, limit: usize) -> Result<Vec<TrendingEntry>> {
        if self.fail {
            bail!("search log unavailable");
        }
        Ok(self.trending.iter().take(limit).cloned().collect())
    }
}
