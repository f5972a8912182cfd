//! Config and data directory resolution.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application directory name.
const APP_DIR: &str = "cinefind";

/// Resolves the config file path.
///
/// - If `dir` is `Some`, returns `{dir}/config.toml`.
/// - Otherwise returns `~/.config/cinefind/config.toml`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join("config.toml"));
    }

    let home = std::env::var("HOME").context("HOME environment variable is not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join(APP_DIR)
        .join("config.toml"))
}

/// Resolves the log directory used while the TUI owns the terminal.
///
/// - If `dir` is `Some`, returns `{dir}/logs`.
/// - Otherwise returns `~/.local/share/cinefind/logs`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_log_dir(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join("logs"));
    }

    let home = std::env::var("HOME").context("HOME environment variable is not set")?;
    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join(APP_DIR)
        .join("logs"))
}
