//! Navigation routes.

use anyhow::{Context, Result, bail};

/// Path prefix of the detail route.
const MOVIE_PREFIX: &str = "/movie/";

/// A screen the browser can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Search/list view (`/`).
    Home,
    /// Detail view for a TMDB movie ID (`/movie/{id}`).
    Movie(u64),
}

impl Route {
    /// Parses a route path.
    ///
    /// A single trailing slash is tolerated.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown paths or a non-numeric movie ID.
    pub fn parse(path: &str) -> Result<Self> {
        let trimmed = path.trim();
        if trimmed == "/" || trimmed.is_empty() {
            return Ok(Self::Home);
        }
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

        let Some(id) = trimmed.strip_prefix(MOVIE_PREFIX) else {
            bail!("unsupported route: {path}");
        };
        if id.is_empty() || id.contains('/') {
            bail!("unsupported route: {path}");
        }
        let id: u64 = id
            .parse()
            .with_context(|| format!("invalid movie id in route: {path}"))?;
        Ok(Self::Movie(id))
    }

    /// Renders the route back into its path form.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => String::from("/"),
            Self::Movie(id) => format!("{MOVIE_PREFIX}{id}"),
        }
    }
}
