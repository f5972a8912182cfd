//! `AppConfig` struct and TOML read/write.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default metadata response language.
const DEFAULT_LANGUAGE: &str = "en-US";

/// Default search debounce window in milliseconds.
const DEFAULT_DEBOUNCE_MS: u64 = 600;

/// Default number of trending entries.
const DEFAULT_TRENDING_LIMIT: usize = 5;

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Metadata API settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Search box settings.
    #[serde(default)]
    pub search: SearchConfig,
    /// Trending strip settings.
    #[serde(default)]
    pub trending: TrendingConfig,
}

/// Metadata API configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TmdbConfig {
    /// Response language (e.g. "en-US", "ja-JP").
    #[serde(default = "default_language")]
    pub language: String,
    /// Base URL override (e.g. a local mock server).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Search box configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchConfig {
    /// Quiet window before a typed query is searched.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

/// Trending strip configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrendingConfig {
    /// Number of entries shown.
    #[serde(default = "default_trending_limit")]
    pub limit: usize,
}

fn default_language() -> String {
    String::from(DEFAULT_LANGUAGE)
}

const fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

const fn default_trending_limit() -> usize {
    DEFAULT_TRENDING_LIMIT
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            base_url: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_TRENDING_LIMIT,
        }
    }
}

impl SearchConfig {
    /// Returns the debounce window as a `Duration`.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}
