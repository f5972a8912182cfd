//! Search-logging collaborator: records searches and serves trending entries.
#![allow(clippy::future_not_send)]

use std::sync::Arc;

use anyhow::{Context, Result};
use cinefind_db::{CachedSearchCount, RecordOutcome, SearchHit, load_trending, record_search};
use rusqlite::Connection;
use tokio::sync::Mutex;

use crate::home::state::MovieSummary;

/// Default number of trending entries.
pub const DEFAULT_TRENDING_LIMIT: usize = 5;

/// A ranked trending entry ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingEntry {
    /// 1-based rank position.
    pub rank: usize,
    /// TMDB movie ID.
    pub movie_id: u64,
    /// Display title.
    pub title: String,
    /// Poster URL (nullable).
    pub poster_url: Option<String>,
    /// Number of recorded searches.
    pub search_count: u32,
}

/// Search-log trait.
///
/// Abstracts the search-count store for fake substitution in tests.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(SearchLog: Send)]
pub trait LocalSearchLog {
    /// Records a search for `query` whose top result was `movie`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    async fn record_search(&self, query: &str, movie: &MovieSummary) -> Result<RecordOutcome>;

    /// Returns up to `limit` entries ordered by descending search count.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    async fn trending(&self, limit: usize) -> Result<Vec<TrendingEntry>>;
}

/// `SQLite`-backed search log.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct SqliteSearchLog {
    /// Shared connection.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSearchLog {
    /// Wraps an opened and migrated connection.
    #[must_use]
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }
}

impl SearchLog for SqliteSearchLog {
    async fn record_search(&self, query: &str, movie: &MovieSummary) -> Result<RecordOutcome> {
        let hit = SearchHit {
            search_term: String::from(query),
            movie_id: movie.id,
            title: movie.title.clone(),
            poster_url: movie.poster_url.clone(),
        };
        let conn = self.conn.lock().await;
        record_search(&conn, &hit).context("failed to record search")
    }

    async fn trending(&self, limit: usize) -> Result<Vec<TrendingEntry>> {
        let conn = self.conn.lock().await;
        let rows = load_trending(&conn, limit).context("failed to load trending searches")?;
        Ok(rank_entries(rows))
    }
}

/// Converts stored records into 1-based ranked entries.
#[must_use]
pub fn rank_entries(rows: Vec<CachedSearchCount>) -> Vec<TrendingEntry> {
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| TrendingEntry {
            rank: i.saturating_add(1),
            movie_id: row.movie_id,
            title: row.title,
            poster_url: row.poster_url,
            search_count: row.count,
        })
        .collect()
}

/// Records a search without ever failing.
///
/// Errors from the store are logged at `warn` and discarded; callers
/// never observe them.
pub async fn log_search_quietly<L: SearchLog>(log: &L, query: &str, movie: &MovieSummary) {
    match SearchLog::record_search(log, query, movie).await {
        Ok(outcome) => {
            tracing::debug!(query, movie_id = movie.id, ?outcome, "Recorded search");
        }
        Err(e) => {
            tracing::warn!(query, error = %e, "Failed to record search count");
        }
    }
}

/// Loads trending entries, returning `None` on failure.
///
/// Errors are logged at `warn`; the caller simply renders no trending
/// section.
pub async fn load_trending_quietly<L: SearchLog>(
    log: &L,
    limit: usize,
) -> Option<Vec<TrendingEntry>> {
    match SearchLog::trending(log, limit).await {
        Ok(entries) => Some(entries),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load trending movies");
            None
        }
    }
}
