//! Terminal views for cinefind: the search/list screen and the movie
//! detail screen, plus the event loop that switches between them.

/// Browser event loop and screen switching.
pub mod app;
/// Quiet-window debouncer for search input.
pub mod debounce;
/// Movie detail view.
pub mod detail;
/// Search/list view.
pub mod home;
/// Route parsing.
pub mod route;
/// Search-logging collaborator.
pub mod search_log;

#[cfg(test)]
mod mocks;
