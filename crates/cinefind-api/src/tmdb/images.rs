//! Image and video URL composition.

/// Base URL of the TMDB image CDN.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Image size used for posters.
pub const POSTER_SIZE: &str = "w500";

/// Image size used for backdrops.
pub const BACKDROP_SIZE: &str = "original";

/// YouTube watch URL prefix.
pub const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Composes a full image URL from a size and a path fragment (`/abc.jpg`).
#[must_use]
pub fn image_url(size: &str, path: &str) -> String {
    format!("{IMAGE_BASE_URL}/{size}{path}")
}

/// Composes a poster URL, or `None` when the movie has no poster.
#[must_use]
pub fn poster_url(path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| image_url(POSTER_SIZE, p))
}

/// Composes a backdrop URL, or `None` when the movie has no backdrop.
#[must_use]
pub fn backdrop_url(path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| image_url(BACKDROP_SIZE, p))
}

/// Composes a YouTube watch URL from a video key.
#[must_use]
pub fn youtube_watch_url(key: &str) -> String {
    format!("{YOUTUBE_WATCH_URL}{key}")
}

/// Converts a YouTube watch URL to its embeddable form.
#[must_use]
pub fn youtube_embed_url(watch_url: &str) -> String {
    watch_url.replacen("watch?v=", "embed/", 1)
}
