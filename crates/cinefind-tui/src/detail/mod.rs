//! Detail view: one movie's metadata, trailer and homepage.

/// Display formatting helpers.
pub mod format;
/// Detail fetch pipeline.
pub mod pipeline;
/// Detail view state types.
pub mod state;
/// Detail view rendering.
pub mod ui;

pub use pipeline::{MovieDetail, load_movie_detail};
pub use state::{DETAIL_ERROR_MESSAGE, DetailOutcome, DetailPhase, DetailState};
