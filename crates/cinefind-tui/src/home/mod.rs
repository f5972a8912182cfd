//! Search/list view: search box, trending strip and result list.

/// List fetch pipeline.
pub mod fetch;
/// Search/list view state types.
pub mod state;
/// Search/list view rendering.
pub mod ui;

pub use fetch::{FETCH_ERROR_MESSAGE, MovieFetch, fetch_movies, fetch_movies_and_log};
pub use state::{HomeState, InputMode, MovieSummary};
