//! Database module for search statistics.
//!
//! Uses `rusqlite` (bundled `SQLite`) to count how often each search term
//! is used and to rank the most-searched movies as "trending".

mod connection;
mod migrations;
/// Search-count CRUD operations.
pub mod searches;

#[allow(clippy::module_name_repetitions)]
pub use connection::{open_db, open_in_memory};
pub use searches::{
    CachedSearchCount, RecordOutcome, SearchHit, load_search_count, load_trending, record_search,
};
