#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;

#[test]
fn test_help_lists_subcommands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinefind");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("browse"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("movie"))
        .stdout(predicate::str::contains("trending"));
}

#[test]
fn test_movie_requires_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinefind");
    cmd.arg("movie")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--id"));
}

#[test]
fn test_search_requires_query() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinefind");
    cmd.arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--query"));
}

#[test]
fn test_browse_rejects_unknown_route() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinefind");
    cmd.args(["browse", "--path", "/bogus", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported route"));
}

#[test]
fn test_browse_rejects_non_numeric_movie_id() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinefind");
    cmd.args(["browse", "--path", "/movie/abc", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid movie id"));
}

#[test]
fn test_trending_on_empty_database() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinefind");
    cmd.args(["trending", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No searches recorded yet"));
    assert!(dir.path().join("cinefind.db").exists());
}

#[test]
fn test_init_config_writes_defaults_once() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    // Act
    let mut cmd = cargo_bin_cmd!("cinefind");
    cmd.args(["init-config", "--dir"])
        .arg(dir.path())
        .assert()
        .success();
    let mut again = cargo_bin_cmd!("cinefind");
    again
        .args(["init-config", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Config already exists"));

    // Assert
    let content = std::fs::read_to_string(config_path).unwrap();
    assert!(content.contains("language = \"en-US\""));
    assert!(content.contains("debounce_ms = 600"));
}

#[test]
fn test_invalid_config_is_reported() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[tmdb\nlanguage = ").unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinefind");
    cmd.args(["trending", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}

#[tokio::test]
async fn test_search_prints_results_and_records_trending() {
    // Arrange
    let mock_server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/3/search/movie"))
        .and(wiremock::matchers::query_param("query", "batman"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(include_str!(
            "../../../fixtures/tmdb/search_movie_batman.json"
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        format!("[tmdb]\nbase_url = \"{}/3/\"\n", mock_server.uri()),
    )
    .unwrap();

    // Act
    let mut search = cargo_bin_cmd!("cinefind");
    search
        .env("TMDB_API_TOKEN", "test-token")
        .args(["search", "--query", "batman", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Batman"))
        .stdout(predicate::str::contains("Total: 1 movies"));

    // Assert
    let mut trending = cargo_bin_cmd!("cinefind");
    trending
        .args(["trending", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("268"))
        .stdout(predicate::str::contains("Batman"));
}

#[tokio::test]
async fn test_movie_fails_with_fixed_message_on_upstream_error() {
    // Arrange
    let mock_server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/3/movie/155"))
        .respond_with(wiremock::ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        format!("[tmdb]\nbase_url = \"{}/3/\"\n", mock_server.uri()),
    )
    .unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinefind");
    cmd.env_remove("TMDB_API_TOKEN")
        .args(["movie", "--id", "155", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not load movie details"));
}
