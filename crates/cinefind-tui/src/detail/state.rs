//! Detail view state management.

use super::pipeline::MovieDetail;

/// Message shown for any failure while loading a detail.
pub const DETAIL_ERROR_MESSAGE: &str = "Could not load movie details";

/// Settled result of a detail load.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome {
    /// Detail loaded.
    Loaded(Box<MovieDetail>),
    /// Any step of the pipeline failed.
    Failed,
}

/// Lifecycle of one detail visit.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailPhase {
    /// Waiting for the pipeline.
    Loading,
    /// Load failed; carries the user-visible message.
    Failed(String),
    /// Load succeeded.
    Loaded(Box<MovieDetail>),
}

/// State for one visit to the detail view.
///
/// Results are keyed by the mount (one per visit) and the movie ID, so a
/// late result from an earlier visit to the same movie is ignored.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct DetailState {
    /// Visit this state belongs to.
    pub mount_id: u64,
    /// Movie this view was opened for.
    pub movie_id: u64,
    /// Current phase.
    pub phase: DetailPhase,
    /// Vertical scroll offset of the body.
    pub scroll: u16,
}

impl DetailState {
    /// Creates a loading state for `movie_id`.
    #[must_use]
    pub const fn new(mount_id: u64, movie_id: u64) -> Self {
        Self {
            mount_id,
            movie_id,
            phase: DetailPhase::Loading,
            scroll: 0,
        }
    }

    /// Applies a settled load.
    ///
    /// Results for another visit or movie, or arriving after the phase
    /// already settled, are ignored. Returns `true` when the state changed.
    pub fn apply(&mut self, mount_id: u64, movie_id: u64, outcome: DetailOutcome) -> bool {
        if mount_id != self.mount_id || movie_id != self.movie_id {
            tracing::debug!(
                mount_id,
                movie_id,
                current_mount = self.mount_id,
                current_movie = self.movie_id,
                "Discarding detail for another visit"
            );
            return false;
        }
        if self.phase != DetailPhase::Loading {
            return false;
        }
        self.phase = match outcome {
            DetailOutcome::Loaded(detail) => DetailPhase::Loaded(detail),
            DetailOutcome::Failed => DetailPhase::Failed(String::from(DETAIL_ERROR_MESSAGE)),
        };
        true
    }

    /// Returns the loaded detail (if any).
    #[must_use]
    pub fn detail(&self) -> Option<&MovieDetail> {
        match &self.phase {
            DetailPhase::Loaded(detail) => Some(detail.as_ref()),
            DetailPhase::Loading | DetailPhase::Failed(_) => None,
        }
    }

    /// Scrolls the body up one line.
    pub const fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Scrolls the body down one line.
    pub const fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }
}
