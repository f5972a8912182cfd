//! Search/list view state management.

use std::time::{Duration, Instant};

use cinefind_api::tmdb::TmdbMovieSummary;
use cinefind_api::tmdb::images::poster_url;
use ratatui::widgets::TableState;

use super::fetch::{FETCH_ERROR_MESSAGE, MovieFetch};
use crate::debounce::Debouncer;
use crate::search_log::TrendingEntry;

/// A movie row for display.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Full poster URL (nullable).
    pub poster_url: Option<String>,
    /// Vote average (nullable).
    pub vote_average: Option<f64>,
    /// Release date (YYYY-MM-DD, nullable).
    pub release_date: Option<String>,
    /// Original language (ISO 639-1, nullable).
    pub original_language: Option<String>,
}

impl From<&TmdbMovieSummary> for MovieSummary {
    fn from(movie: &TmdbMovieSummary) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_url: poster_url(movie.poster_path.as_deref()),
            vote_average: movie.vote_average,
            release_date: movie.release_date.clone(),
            original_language: movie.original_language.clone(),
        }
    }
}

/// Input mode for the search/list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keystrokes edit the search box.
    Search,
    /// Keystrokes navigate the list.
    Normal,
}

/// State for the search/list view.
///
/// One instance lives for one mount of the view; remounting starts fresh.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct HomeState {
    /// Identifier of this mount, used to route trending results.
    pub mount_id: u64,
    /// Raw search box text.
    pub search_term: String,
    /// Current result list.
    pub movies: Vec<MovieSummary>,
    /// User-visible error (may coexist with `movies`).
    pub error_message: Option<String>,
    /// Whether a list fetch is in flight.
    pub is_loading: bool,
    /// Ranked trending entries (empty when unavailable).
    pub trending: Vec<TrendingEntry>,
    /// Table state for the result list (handles selection and scroll).
    pub table_state: TableState,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Query the last fetch was issued for.
    committed_query: String,
    /// Latest issued list request.
    latest_request: Option<u64>,
    /// Pending search-box value.
    debouncer: Debouncer,
}

impl HomeState {
    /// Creates the state for a fresh mount with an empty committed query.
    #[must_use]
    pub fn new(mount_id: u64, debounce: Duration) -> Self {
        Self {
            mount_id,
            search_term: String::new(),
            movies: Vec::new(),
            error_message: None,
            is_loading: false,
            trending: Vec::new(),
            table_state: TableState::default(),
            input_mode: InputMode::Search,
            committed_query: String::new(),
            latest_request: None,
            debouncer: Debouncer::new(debounce),
        }
    }

    /// Returns the committed query.
    #[must_use]
    pub fn committed_query(&self) -> &str {
        &self.committed_query
    }

    /// Appends a character to the search box.
    pub fn input_push(&mut self, c: char, now: Instant) {
        self.search_term.push(c);
        self.debouncer.schedule(self.search_term.clone(), now);
    }

    /// Removes the last character from the search box.
    pub fn input_pop(&mut self, now: Instant) {
        if self.search_term.pop().is_some() {
            self.debouncer.schedule(self.search_term.clone(), now);
        }
    }

    /// Clears the search box.
    pub fn input_clear(&mut self, now: Instant) {
        if !self.search_term.is_empty() {
            self.search_term.clear();
            self.debouncer.schedule(String::new(), now);
        }
    }

    /// Commits the debounced search text once its quiet window elapsed.
    ///
    /// Returns the new committed query when it differs from the previous one,
    /// i.e. when a fetch must be issued.
    pub fn poll_debounce(&mut self, now: Instant) -> Option<String> {
        let value = self.debouncer.take_due(now)?;
        if value == self.committed_query {
            return None;
        }
        self.committed_query.clone_from(&value);
        Some(value)
    }

    /// Marks a list fetch as started.
    pub fn begin_fetch(&mut self, request_id: u64) {
        self.latest_request = Some(request_id);
        self.is_loading = true;
        self.error_message = None;
    }

    /// Applies a settled list fetch.
    ///
    /// Returns `false` and leaves the state untouched when `request_id` is not
    /// the latest issued request.
    pub fn apply_movies(&mut self, request_id: u64, fetch: MovieFetch) -> bool {
        if self.latest_request != Some(request_id) {
            tracing::debug!(
                request_id,
                latest = ?self.latest_request,
                "Discarding stale movie list"
            );
            return false;
        }
        self.is_loading = false;
        match fetch {
            MovieFetch::Loaded { movies, error } => {
                self.movies = movies;
                self.error_message = error;
                let selected = if self.movies.is_empty() { None } else { Some(0) };
                self.table_state.select(selected);
            }
            MovieFetch::Failed => {
                self.error_message = Some(String::from(FETCH_ERROR_MESSAGE));
            }
        }
        true
    }

    /// Applies the trending list for this mount. `None` hides the section.
    pub fn apply_trending(&mut self, entries: Option<Vec<TrendingEntry>>) {
        self.trending = entries.unwrap_or_default();
    }

    /// Returns the selected movie (if any).
    #[must_use]
    pub fn selected_movie(&self) -> Option<&MovieSummary> {
        self.movies.get(self.table_state.selected()?)
    }

    /// Returns the movie ID of the trending entry at 1-based `rank`.
    #[must_use]
    pub fn trending_movie(&self, rank: usize) -> Option<u64> {
        self.trending
            .iter()
            .find(|entry| entry.rank == rank)
            .map(|entry| entry.movie_id)
    }

    /// Moves the selection up.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_up(&mut self) {
        if let Some(current) = self.table_state.selected()
            && current > 0
        {
            self.table_state.select(Some(current - 1));
        }
    }

    /// Moves the selection down.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_down(&mut self) {
        let current = self.table_state.selected().unwrap_or(0);
        if current + 1 < self.movies.len() {
            self.table_state.select(Some(current + 1));
        }
    }
}
