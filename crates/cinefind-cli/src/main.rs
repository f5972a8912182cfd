//! cinefind - terminal movie discovery.

/// Application configuration (TOML).
mod config;
/// Tracing subscriber setup.
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::instrument;
use url::Url;

use crate::config::{AppConfig, resolve_config_path, resolve_log_dir};
use crate::logging::{LogTarget, init_logging};
use cinefind_api::tmdb::TmdbClient;
use cinefind_db::open_db;
use cinefind_tui::app::{BrowserOptions, run_browser};
use cinefind_tui::detail::format::{
    format_money, format_rating, format_runtime, join_names, release_year,
};
use cinefind_tui::detail::{DETAIL_ERROR_MESSAGE, load_movie_detail};
use cinefind_tui::home::{FETCH_ERROR_MESSAGE, MovieFetch, MovieSummary, fetch_movies_and_log};
use cinefind_tui::route::Route;
use cinefind_tui::search_log::{SearchLog, SqliteSearchLog};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config/data directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse movies interactively.
    Browse(BrowseArgs),
    /// Search movies by title and record the search.
    Search(SearchArgs),
    /// List popular movies.
    Discover(LanguageArgs),
    /// Show one movie's details.
    Movie(MovieArgs),
    /// Show the most searched movies.
    Trending(TrendingArgs),
    /// Write a default config file if none exists.
    InitConfig,
}

/// Arguments for the `browse` subcommand.
#[derive(clap::Args)]
struct BrowseArgs {
    /// Route to open first ("/" or "/movie/{id}").
    #[arg(long, default_value = "/")]
    path: String,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "batman").
    #[arg(long, required = true)]
    query: String,
    /// Response language (default: config `tmdb.language`).
    #[arg(long)]
    language: Option<String>,
}

/// Language-only arguments.
#[derive(clap::Args)]
struct LanguageArgs {
    /// Response language (default: config `tmdb.language`).
    #[arg(long)]
    language: Option<String>,
}

/// Arguments for the `movie` subcommand.
#[derive(clap::Args)]
struct MovieArgs {
    /// TMDB movie ID (e.g. 155).
    #[arg(long, required = true)]
    id: u64,
    /// Response language (default: config `tmdb.language`).
    #[arg(long)]
    language: Option<String>,
}

/// Arguments for the `trending` subcommand.
#[derive(clap::Args)]
struct TrendingArgs {
    /// Number of entries (default: config `trending.limit`).
    #[arg(long)]
    limit: Option<usize>,
}

/// Loads the config for `dir`.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    AppConfig::load(&config_path).context("failed to load config")
}

/// Builds a TMDB API client from the environment and config.
///
/// A missing `TMDB_API_TOKEN` is not fatal: requests go out with an empty
/// token and fail authorization.
///
/// # Errors
///
/// Returns an error if the configured base URL is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let api_token = std::env::var("TMDB_API_TOKEN").unwrap_or_else(|_| {
        tracing::warn!("TMDB_API_TOKEN is not set; metadata requests will fail authorization");
        String::new()
    });

    let mut builder = TmdbClient::builder().api_token(api_token).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(base_url) = &config.tmdb.base_url {
        let url = Url::parse(base_url)
            .with_context(|| format!("invalid tmdb.base_url in config: {base_url}"))?;
        builder = builder.base_url(url);
    }

    builder.build().context("failed to build TMDB client")
}

/// Opens the search-count database as a search log.
fn open_search_log(dir: Option<&PathBuf>) -> Result<SqliteSearchLog> {
    let conn = open_db(dir).context("failed to open database")?;
    Ok(SqliteSearchLog::new(conn))
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the route is invalid, setup fails, or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(args: &BrowseArgs, dir: Option<&PathBuf>) -> Result<()> {
    let start = Route::parse(&args.path).context("invalid --path")?;
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;
    let log = open_search_log(dir)?;

    let options = BrowserOptions {
        start,
        debounce: config.search.debounce(),
        trending_limit: config.trending.limit,
        language: config.tmdb.language,
    };
    tracing::info!(path = %start.path(), "Launching browser");

    run_browser(Arc::new(client), Arc::new(log), options)
        .await
        .context("browser TUI failed")
}

/// Prints a movie list.
fn print_movies(movies: &[MovieSummary]) {
    tracing::info!("ID\tTitle\t\t\tRating\tLang\tYear");
    for movie in movies {
        tracing::info!(
            "{}\t{}\t{}\t{}\t{}",
            movie.id,
            movie.title,
            format_rating(movie.vote_average),
            movie.original_language.as_deref().unwrap_or("-"),
            movie.release_date.as_deref().map_or("-", release_year),
        );
    }
    tracing::info!("Total: {} movies", movies.len());
}

/// Fetches and prints a list for `query` (empty: popular movies).
///
/// # Errors
///
/// Returns an error if the fetch fails.
async fn run_list(
    config: &AppConfig,
    dir: Option<&PathBuf>,
    query: &str,
    language: &str,
) -> Result<()> {
    let client = build_tmdb_client(config)?;
    let log = open_search_log(dir)?;

    let mut outcome = None;
    fetch_movies_and_log(&client, &log, query, language, |fetch| {
        outcome = Some(fetch);
    })
    .await;

    match outcome {
        Some(MovieFetch::Loaded { movies, error }) => {
            if let Some(message) = error {
                tracing::warn!("{message}");
            }
            print_movies(&movies);
            Ok(())
        }
        Some(MovieFetch::Failed) | None => bail!("{FETCH_ERROR_MESSAGE}"),
    }
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the fetch fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let language = args.language.as_deref().unwrap_or(&config.tmdb.language);
    run_list(&config, dir, &args.query, language).await
}

/// Runs the `discover` subcommand.
///
/// # Errors
///
/// Returns an error if the fetch fails.
#[instrument(skip_all)]
async fn run_discover(args: &LanguageArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let language = args.language.as_deref().unwrap_or(&config.tmdb.language);
    run_list(&config, dir, "", language).await
}

/// Runs the `movie` subcommand.
///
/// # Errors
///
/// Returns an error if either the details or the videos request fails.
#[instrument(skip_all, fields(movie_id = args.id))]
async fn run_movie(args: &MovieArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;
    let language = args.language.as_deref().unwrap_or(&config.tmdb.language);

    let detail = load_movie_detail(&client, args.id, language)
        .await
        .context(DETAIL_ERROR_MESSAGE)?;

    let release_date = detail.release_date.as_deref().unwrap_or_default();
    tracing::info!("{}  {}", detail.title, format_rating(detail.vote_average));
    tracing::info!(
        "{} \u{2022} {}",
        release_year(release_date),
        format_runtime(detail.runtime)
    );
    tracing::info!("Genres:       {}", join_names(&detail.genres));
    tracing::info!("Overview:     {}", detail.overview);
    tracing::info!("Release Date: {release_date}");
    tracing::info!("Countries:    {}", join_names(&detail.countries));
    tracing::info!("Status:       {}", detail.status.as_deref().unwrap_or("-"));
    tracing::info!("Languages:    {}", join_names(&detail.languages));
    tracing::info!("Budget:       {}", format_money(detail.budget));
    tracing::info!("Revenue:      {}", format_money(detail.revenue));
    tracing::info!("Tagline:      {}", detail.tagline);
    tracing::info!("Production:   {}", join_names(&detail.production_companies));
    if let Some(homepage) = &detail.homepage {
        tracing::info!("Homepage:     {homepage}");
    }
    match detail.embed_url() {
        Some(embed) => tracing::info!("Trailer:      {embed}"),
        None => tracing::info!("No trailer available"),
    }

    Ok(())
}

/// Runs the `trending` subcommand.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or read.
#[instrument(skip_all)]
async fn run_trending(args: &TrendingArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let limit = args.limit.unwrap_or(config.trending.limit);
    let log = open_search_log(dir)?;

    let entries = log
        .trending(limit)
        .await
        .context("failed to load trending movies")?;

    if entries.is_empty() {
        tracing::info!("No searches recorded yet.");
        return Ok(());
    }

    tracing::info!("Rank\tID\tSearches\tTitle");
    for entry in &entries {
        tracing::info!(
            "{}\t{}\t{}\t\t{}",
            entry.rank,
            entry.movie_id,
            entry.search_count,
            entry.title
        );
    }

    Ok(())
}

/// Runs the `init-config` subcommand.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or written.
fn run_init_config(dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    if config_path.exists() {
        tracing::info!("Config already exists: {}", config_path.display());
        return Ok(());
    }

    AppConfig::default()
        .save(&config_path)
        .context("failed to write config")?;
    tracing::info!("Wrote default config: {}", config_path.display());
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let dir = cli.dir.as_ref();

    let target = match &cli.command {
        Commands::Browse(_) => {
            LogTarget::File(resolve_log_dir(dir).context("failed to resolve log directory")?)
        }
        _ => LogTarget::Stdout,
    };
    let _guard = init_logging(&target)?;

    match &cli.command {
        Commands::Browse(args) => run_browse(args, dir).await,
        Commands::Search(args) => run_search(args, dir).await,
        Commands::Discover(args) => run_discover(args, dir).await,
        Commands::Movie(args) => run_movie(args, dir).await,
        Commands::Trending(args) => run_trending(args, dir).await,
        Commands::InitConfig => run_init_config(dir),
    }
}
