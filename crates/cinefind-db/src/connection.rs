//! Opening the search-count database.
//!
//! The browser and one-shot commands may hold the same file open at once,
//! so every connection waits on a locked database instead of failing.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations::run_migrations;

/// Database file name inside the data directory.
const DB_FILE_NAME: &str = "cinefind.db";

/// How long a write waits for another process to release its lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the search-count database under `dir`, creating it on first use.
///
/// Without `dir` the file lives at `~/.local/share/cinefind/cinefind.db`.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created, `SQLite`
/// cannot open the file, or the schema cannot be brought up to date.
pub fn open_db(dir: Option<&PathBuf>) -> Result<Connection> {
    let data_dir = match dir {
        Some(d) => d.clone(),
        None => default_data_dir()?,
    };
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

    let db_path = data_dir.join(DB_FILE_NAME);
    let conn = Connection::open(&db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))?;
    prepare(&conn, &db_path)?;

    tracing::debug!(path = %db_path.display(), "Opened search-count database");
    Ok(conn)
}

/// Opens a migrated in-memory database.
///
/// # Errors
///
/// Returns an error if `SQLite` cannot allocate the database or migrations fail.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    prepare(&conn, Path::new(":memory:"))?;
    Ok(conn)
}

/// Applies connection settings and migrations.
fn prepare(conn: &Connection, db_path: &Path) -> Result<()> {
    conn.busy_timeout(BUSY_TIMEOUT)
        .context("failed to set busy timeout")?;
    run_migrations(conn)
        .with_context(|| format!("database migration failed for {}", db_path.display()))
}

/// `~/.local/share/cinefind`.
fn default_data_dir() -> Result<PathBuf> {
    let home = std::env::var_os("HOME").context("HOME environment variable is not set")?;
    Ok(PathBuf::from(home).join(".local/share/cinefind"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_open_db_creates_nested_data_dir() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested").join("data");

        // Act
        let conn = open_db(Some(&data_dir)).unwrap();

        // Assert
        let version: u32 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert_eq!(version, 1);
        assert!(data_dir.join(DB_FILE_NAME).exists());
    }

    #[test]
    fn test_second_connection_sees_first_connection_rows() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().to_path_buf();
        let writer = open_db(Some(&data_dir)).unwrap();
        writer
            .execute(
                "INSERT INTO search_counts (search_term, movie_id, title, updated_at)
                 VALUES ('heat', 949, 'Heat', '2024-01-01T00:00:00.000')",
                [],
            )
            .unwrap();

        // Act
        let reader = open_db(Some(&data_dir)).unwrap();
        let title: String = reader
            .query_row(
                "SELECT title FROM search_counts WHERE search_term = 'heat'",
                [],
                |row| row.get(0),
            )
            .unwrap();

        // Assert
        assert_eq!(title, "Heat");
    }

    #[test]
    fn test_busy_timeout_is_applied() {
        // Arrange & Act
        let conn = open_in_memory().unwrap();

        // Assert
        let timeout_ms: u64 = conn
            .pragma_query_value(None, "busy_timeout", |row| row.get(0))
            .unwrap();
        assert_eq!(timeout_ms, 5_000);
    }

    #[test]
    fn test_default_data_dir_under_home() {
        // Arrange & Act
        let data_dir = default_data_dir().unwrap();

        // Assert
        assert!(data_dir.ends_with(".local/share/cinefind"));
    }
}
