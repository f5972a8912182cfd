//! Schema versioning with `PRAGMA user_version`.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Schema version written after a successful migration.
const SCHEMA_VERSION: u32 = 1;

/// Brings the schema up to `SCHEMA_VERSION`.
///
/// # Errors
///
/// Returns an error if the version cannot be read or a statement fails.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let version: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read user_version")?;
    if version >= SCHEMA_VERSION {
        return Ok(());
    }

    create_search_counts(conn).context("failed to create search_counts schema")?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)
        .context("failed to update user_version")?;
    tracing::debug!(from = version, to = SCHEMA_VERSION, "Migrated search-count schema");

    Ok(())
}

/// One row per normalised search term, plus the index the trending query walks.
fn create_search_counts(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS search_counts (
            search_term  TEXT PRIMARY KEY,
            count        INTEGER NOT NULL DEFAULT 1,
            movie_id     INTEGER NOT NULL,
            title        TEXT NOT NULL,
            poster_url   TEXT,
            updated_at   TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_search_counts_rank
            ON search_counts(count DESC, updated_at DESC);",
    )?;
    Ok(())
}
