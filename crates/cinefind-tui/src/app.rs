//! Browser event loop: owns the current screen and routes fetch results to it.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use cinefind_api::tmdb::TmdbApi;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::debounce::DEFAULT_DEBOUNCE;
use crate::detail::{DetailOutcome, DetailState, load_movie_detail};
use crate::home::{HomeState, InputMode, MovieFetch, fetch_movies_and_log};
use crate::route::Route;
use crate::search_log::{DEFAULT_TRENDING_LIMIT, SearchLog, TrendingEntry, load_trending_quietly};
use crate::{detail, home};

/// Idle wait between event-loop iterations.
const TICK: Duration = Duration::from_millis(50);

/// Result posted by a background fetch.
#[derive(Debug)]
pub enum AppMessage {
    /// A list fetch settled.
    Movies {
        /// Request the list belongs to.
        request_id: u64,
        /// Fetch outcome.
        fetch: MovieFetch,
    },
    /// Trending entries loaded (`None` on failure).
    Trending {
        /// Search/list mount the entries belong to.
        mount_id: u64,
        /// Ranked entries.
        entries: Option<Vec<TrendingEntry>>,
    },
    /// A detail load settled.
    Detail {
        /// Detail visit the result belongs to.
        mount_id: u64,
        /// Movie the detail belongs to.
        movie_id: u64,
        /// Load outcome.
        outcome: DetailOutcome,
    },
}

/// Browser settings.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// Initial route.
    pub start: Route,
    /// Quiet window before a search is committed.
    pub debounce: Duration,
    /// Number of trending entries to show.
    pub trending_limit: usize,
    /// Response language for metadata requests.
    pub language: String,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            start: Route::Home,
            debounce: DEFAULT_DEBOUNCE,
            trending_limit: DEFAULT_TRENDING_LIMIT,
            language: String::from("en-US"),
        }
    }
}

/// The screen currently shown.
#[derive(Debug)]
enum Screen {
    /// Search/list view.
    Home(HomeState),
    /// Detail view.
    Detail(DetailState),
}

/// Browser application state.
///
/// Fetches run as spawned tasks that report back through an unbounded
/// channel; leaving a screen drops its state, so late results find no
/// matching screen and are discarded.
#[derive(Debug)]
pub struct App<A, L> {
    /// Metadata API.
    api: Arc<A>,
    /// Search log.
    log: Arc<L>,
    /// Browser settings.
    options: BrowserOptions,
    /// Sender handed to background tasks.
    tx: UnboundedSender<AppMessage>,
    /// Current screen.
    screen: Screen,
    /// Next request/mount identifier.
    next_id: u64,
    /// Set when the user asked to quit.
    quit: bool,
}

impl<A, L> App<A, L>
where
    A: TmdbApi + Send + Sync + 'static,
    L: SearchLog + Send + Sync + 'static,
{
    /// Creates the app and mounts `options.start`.
    ///
    /// Must be called within a tokio runtime.
    pub fn new(
        api: Arc<A>,
        log: Arc<L>,
        options: BrowserOptions,
        tx: UnboundedSender<AppMessage>,
    ) -> Self {
        let start = options.start;
        let mut app = Self {
            api,
            log,
            screen: Screen::Home(HomeState::new(0, options.debounce)),
            options,
            tx,
            next_id: 0,
            quit: false,
        };
        app.navigate(start);
        app
    }

    /// Returns the current route.
    #[must_use]
    pub const fn route(&self) -> Route {
        match &self.screen {
            Screen::Home(_) => Route::Home,
            Screen::Detail(state) => Route::Movie(state.movie_id),
        }
    }

    /// Returns the search/list state when that screen is shown.
    #[must_use]
    pub const fn home(&self) -> Option<&HomeState> {
        match &self.screen {
            Screen::Home(state) => Some(state),
            Screen::Detail(_) => None,
        }
    }

    /// Returns the detail state when that screen is shown.
    #[must_use]
    pub const fn detail(&self) -> Option<&DetailState> {
        match &self.screen {
            Screen::Detail(state) => Some(state),
            Screen::Home(_) => None,
        }
    }

    /// Returns `true` once the user asked to quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.quit
    }

    /// Switches to `route`, mounting a fresh screen.
    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(path = %route.path(), "Navigating");
        match route {
            Route::Home => {
                let mount_id = self.allocate_id();
                self.screen = Screen::Home(HomeState::new(mount_id, self.options.debounce));
                self.spawn_trending(mount_id);
                self.spawn_movies(String::new());
            }
            Route::Movie(movie_id) => {
                let mount_id = self.allocate_id();
                self.screen = Screen::Detail(DetailState::new(mount_id, movie_id));
                self.spawn_detail(mount_id, movie_id);
            }
        }
    }

    /// Routes a background result to the current screen.
    pub fn handle_message(&mut self, msg: AppMessage) {
        match (&mut self.screen, msg) {
            (Screen::Home(state), AppMessage::Movies { request_id, fetch }) => {
                state.apply_movies(request_id, fetch);
            }
            (Screen::Home(state), AppMessage::Trending { mount_id, entries })
                if state.mount_id == mount_id =>
            {
                state.apply_trending(entries);
            }
            (
                Screen::Detail(state),
                AppMessage::Detail {
                    mount_id,
                    movie_id,
                    outcome,
                },
            ) => {
                state.apply(mount_id, movie_id, outcome);
            }
            (_, msg) => {
                tracing::debug!(?msg, "Dropping result for an inactive view");
            }
        }
    }

    /// Advances timers; commits a debounced search when due.
    pub fn tick(&mut self, now: Instant) {
        let Screen::Home(state) = &mut self.screen else {
            return;
        };
        if let Some(query) = state.poll_debounce(now) {
            tracing::debug!(query, "Committed search query");
            self.spawn_movies(query);
        }
    }

    /// Handles one key press.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }
        let target = match &mut self.screen {
            Screen::Home(state) => match state.input_mode {
                InputMode::Search => handle_search_input(state, key, now),
                InputMode::Normal => handle_home_normal_input(state, key.code, &mut self.quit),
            },
            Screen::Detail(state) => handle_detail_input(state, key.code, &mut self.quit),
        };
        if let Some(route) = target {
            self.navigate(route);
        }
    }

    /// Draws the current screen.
    pub fn draw(&mut self, frame: &mut Frame) {
        match &mut self.screen {
            Screen::Home(state) => home::ui::draw(frame, state),
            Screen::Detail(state) => detail::ui::draw(frame, state),
        }
    }

    /// Returns a fresh request/mount identifier.
    const fn allocate_id(&mut self) -> u64 {
        self.next_id = self.next_id.wrapping_add(1);
        self.next_id
    }

    /// Starts a list fetch for `query` and marks the list as loading.
    fn spawn_movies(&mut self, query: String) {
        let request_id = self.allocate_id();
        let Screen::Home(state) = &mut self.screen else {
            return;
        };
        state.begin_fetch(request_id);

        let api = Arc::clone(&self.api);
        let log = Arc::clone(&self.log);
        let tx = self.tx.clone();
        let language = self.options.language.clone();
        tokio::spawn(async move {
            fetch_movies_and_log(api.as_ref(), log.as_ref(), &query, &language, |fetch| {
                if tx.send(AppMessage::Movies { request_id, fetch }).is_err() {
                    tracing::debug!(request_id, "Browser closed before movies arrived");
                }
            })
            .await;
        });
    }

    /// Loads the trending strip for one mount.
    fn spawn_trending(&self, mount_id: u64) {
        let log = Arc::clone(&self.log);
        let tx = self.tx.clone();
        let limit = self.options.trending_limit;
        tokio::spawn(async move {
            let entries = load_trending_quietly(log.as_ref(), limit).await;
            if tx.send(AppMessage::Trending { mount_id, entries }).is_err() {
                tracing::debug!(mount_id, "Browser closed before trending arrived");
            }
        });
    }

    /// Loads the detail for `movie_id` on behalf of one visit.
    fn spawn_detail(&self, mount_id: u64, movie_id: u64) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let language = self.options.language.clone();
        tokio::spawn(async move {
            let outcome = match load_movie_detail(api.as_ref(), movie_id, &language).await {
                Ok(detail) => DetailOutcome::Loaded(Box::new(detail)),
                Err(e) => {
                    tracing::error!(
                        movie_id,
                        error = %format!("{e:#}"),
                        "Could not load movie details"
                    );
                    DetailOutcome::Failed
                }
            };
            let msg = AppMessage::Detail {
                mount_id,
                movie_id,
                outcome,
            };
            if tx.send(msg).is_err() {
                tracing::debug!(movie_id, "Browser closed before detail arrived");
            }
        });
    }
}

/// Handles key input while typing in the search box.
fn handle_search_input(state: &mut HomeState, key: KeyEvent, now: Instant) -> Option<Route> {
    match key.code {
        KeyCode::Esc => state.input_mode = InputMode::Normal,
        KeyCode::Enter => return state.selected_movie().map(|m| Route::Movie(m.id)),
        KeyCode::Up => state.move_up(),
        KeyCode::Down => state.move_down(),
        KeyCode::Backspace => state.input_pop(now),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.input_clear(now);
        }
        KeyCode::Char(c) => state.input_push(c, now),
        _ => {}
    }
    None
}

/// Handles key input while navigating the list.
fn handle_home_normal_input(
    state: &mut HomeState,
    key: KeyCode,
    quit: &mut bool,
) -> Option<Route> {
    match key {
        KeyCode::Char('q') => *quit = true,
        KeyCode::Up | KeyCode::Char('k') => state.move_up(),
        KeyCode::Down | KeyCode::Char('j') => state.move_down(),
        KeyCode::Char('/' | 'i') => state.input_mode = InputMode::Search,
        KeyCode::Enter => return state.selected_movie().map(|m| Route::Movie(m.id)),
        KeyCode::Char(c @ '1'..='9') => {
            let rank = c.to_digit(10).and_then(|d| usize::try_from(d).ok())?;
            return state.trending_movie(rank).map(Route::Movie);
        }
        _ => {}
    }
    None
}

/// Handles key input on the detail screen.
fn handle_detail_input(state: &mut DetailState, key: KeyCode, quit: &mut bool) -> Option<Route> {
    match key {
        KeyCode::Char('q') => *quit = true,
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => return Some(Route::Home),
        KeyCode::Up | KeyCode::Char('k') => state.scroll_up(),
        KeyCode::Down | KeyCode::Char('j') => state.scroll_down(),
        KeyCode::Char('o') => {
            if let Some(url) = state.detail().and_then(|d| d.trailer_url.clone()) {
                open_in_browser(&url);
            }
        }
        KeyCode::Char('h') => {
            if let Some(url) = state.detail().and_then(|d| d.homepage.clone()) {
                open_in_browser(&url);
            }
        }
        _ => {}
    }
    None
}

/// Opens `url` in the system browser.
fn open_in_browser(url: &str) {
    if let Err(e) = open::that(url) {
        tracing::warn!(url, error = %e, "Failed to open browser");
    }
}

/// Runs the interactive browser until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup, drawing or event handling fails.
pub async fn run_browser<A, L>(api: Arc<A>, log: Arc<L>, options: BrowserOptions) -> Result<()>
where
    A: TmdbApi + Send + Sync + 'static,
    L: SearchLog + Send + Sync + 'static,
{
    let (tx, mut rx) = unbounded_channel();
    let mut app = App::new(api, log, options, tx);

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app, &mut rx).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
///
/// Terminal input is drained without blocking so spawned fetches keep
/// running on the single-threaded runtime.
async fn run_event_loop<A, L>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<A, L>,
    rx: &mut UnboundedReceiver<AppMessage>,
) -> Result<()>
where
    A: TmdbApi + Send + Sync + 'static,
    L: SearchLog + Send + Sync + 'static,
{
    loop {
        terminal
            .draw(|frame| app.draw(frame))
            .context("failed to draw TUI")?;

        while event::poll(Duration::ZERO).context("failed to poll events")? {
            if let Event::Key(key) = event::read().context("failed to read event")?
                && key.kind == KeyEventKind::Press
            {
                app.handle_key(key, Instant::now());
            }
        }
        if app.should_quit() {
            return Ok(());
        }

        tokio::select! {
            Some(msg) = rx.recv() => app.handle_message(msg),
            () = tokio::time::sleep(TICK) => {}
        }
        app.tick(Instant::now());
    }
}
