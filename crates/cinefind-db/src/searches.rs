//! Search-count CRUD operations.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

/// A search term together with the movie it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Search term as typed by the user.
    pub search_term: String,
    /// TMDB ID of the top result.
    pub movie_id: u64,
    /// Title of the top result.
    pub title: String,
    /// Poster URL of the top result (nullable).
    pub poster_url: Option<String>,
}

/// A stored search-count record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedSearchCount {
    /// Search term.
    pub search_term: String,
    /// Number of times the term was searched.
    pub count: u32,
    /// TMDB ID cached when the term was first recorded.
    pub movie_id: u64,
    /// Title cached when the term was first recorded.
    pub title: String,
    /// Poster URL cached when the term was first recorded (nullable).
    pub poster_url: Option<String>,
    /// Last time the term was searched.
    pub updated_at: String,
}

/// Result of [`record_search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A new record was created with count 1.
    Inserted,
    /// An existing record was incremented to the contained count.
    Incremented(u32),
    /// Nothing was stored (blank search term).
    Skipped,
}

/// Records one search for `hit.search_term`.
///
/// Creates the record with `count = 1` and the cached movie fields when the
/// term is new, otherwise increments the count in the same statement. The
/// cached movie fields of an existing record are left untouched.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn record_search(conn: &Connection, hit: &SearchHit) -> Result<RecordOutcome> {
    if hit.search_term.trim().is_empty() {
        return Ok(RecordOutcome::Skipped);
    }

    let count: u32 = conn
        .query_row(
            "INSERT INTO search_counts (search_term, count, movie_id, title, poster_url, updated_at)
             VALUES (?1, 1, ?2, ?3, ?4, strftime('%Y-%m-%dT%H:%M:%f', 'now'))
             ON CONFLICT(search_term) DO UPDATE SET
                count = search_counts.count + 1,
                updated_at = excluded.updated_at
             RETURNING count",
            rusqlite::params![hit.search_term, hit.movie_id, hit.title, hit.poster_url],
            |row| row.get(0),
        )
        .with_context(|| format!("failed to record search '{}'", hit.search_term))?;

    if count <= 1 {
        Ok(RecordOutcome::Inserted)
    } else {
        Ok(RecordOutcome::Incremented(count))
    }
}

/// Loads up to `limit` records ordered by descending count.
///
/// Ties are broken by the most recent search, then by term.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn load_trending(conn: &Connection, limit: usize) -> Result<Vec<CachedSearchCount>> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);

    let mut stmt = conn
        .prepare(
            "SELECT search_term, count, movie_id, title, poster_url, updated_at
             FROM search_counts
             ORDER BY count DESC, updated_at DESC, search_term ASC
             LIMIT ?1",
        )
        .context("failed to prepare trending query")?;

    let rows = stmt
        .query_map([limit], row_to_cached)
        .context("failed to query trending searches")?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .context("failed to read trending rows")
}

/// Loads the record for a single search term.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn load_search_count(
    conn: &Connection,
    search_term: &str,
) -> Result<Option<CachedSearchCount>> {
    conn.query_row(
        "SELECT search_term, count, movie_id, title, poster_url, updated_at
         FROM search_counts
         WHERE search_term = ?1",
        [search_term],
        row_to_cached,
    )
    .optional()
    .with_context(|| format!("failed to load search count for '{search_term}'"))
}

/// Maps a `search_counts` row.
fn row_to_cached(row: &rusqlite::Row<'_>) -> rusqlite::Result<CachedSearchCount> {
    Ok(CachedSearchCount {
        search_term: row.get(0)?,
        count: row.get(1)?,
        movie_id: row.get(2)?,
        title: row.get(3)?,
        poster_url: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
