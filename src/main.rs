// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

mod commander;
mod components;
mod config;
mod events;
mod model;
mod playback;
mod render;
mod tasks;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    fs::File,
    io::{self},
    sync::{
        Mutex,
        mpsc::{self, Receiver, Sender},
    },
    thread,
    time::Duration,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    commander::Commander,
    components::{LibraryView, SearchView},
    config::AppConfig,
    events::{AppEvent, process_events},
    model::{library::Library, mock, search::Search},
    playback::{PlaybackController, PlaybackSettings, ThreadTickScheduler},
    tasks::AppTask,
    theme::Theme,
};

const DEFAULT_LOG_FILTER: &str = "cue=info";

const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// The view shown beside the sidebar.
#[derive(Debug, Clone, Copy, PartialEq)]
enum MainView {
    Search,
    Library,
}

/// Application state.
///
/// Owned by the main thread; background threads only reach it through
/// [`AppEvent`]s sent on `event_tx`.
struct App {
    pub config: AppConfig,

    pub theme: Theme,
    pub main_view: MainView,
    pub sidebar_collapsed: bool,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub task_tx: Sender<AppTask>,

    pub playback: PlaybackController<ThreadTickScheduler>,

    pub search: Search,
    pub library: Library,

    pub search_view: SearchView,
    pub library_view: LibraryView,

    pub commander: Commander,

    /// The last error, shown on the status line until the next key press.
    pub status: Option<String>,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, task_tx: Sender<AppTask>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        let scheduler = ThreadTickScheduler::new(event_tx.clone());
        let playback = PlaybackController::new(scheduler, PlaybackSettings::from(&config.playback));

        let search = Search::new(config.search.default_bpm, config.search.default_key);
        let library = Library::new(
            mock::library_sounds(),
            (config.library.bpm_min, config.library.bpm_max),
        );

        Self {
            config,
            theme: Theme::default(),
            main_view: MainView::Search,
            sidebar_collapsed: false,
            event_tx,
            event_rx,
            task_tx,
            playback,
            search,
            library,
            search_view: SearchView::new(),
            library_view: LibraryView::new(),
            commander: Commander::new(),
            status: None,
        }
    }
}

/// The entry point of the application.
///
/// Loads the configuration, starts logging, manages the terminal lifecycle
/// and returns an error if any part of the execution fails. Playback is
/// disposed before the terminal is restored, whatever the outcome.
fn main() -> Result<()> {
    let (config, config_error) = match config::load_config() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_logging(&config)?;
    if let Some(e) = config_error {
        warn!(error = %e, "invalid configuration, using defaults");
    }
    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let (task_tx, task_rx) = mpsc::channel();

    let mut app = App::new(config, task_tx);

    util::term::install_panic_hook();

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app, task_rx);
    app.playback.dispose();
    restore_terminal(&mut terminal);

    if let Err(e) = &res {
        warn!(error = %e, "application error");
    }
    info!("exiting");

    res.context("Application error occurred")
}

/// Sends log output to the configured file, since the terminal belongs to the
/// user interface. `RUST_LOG` overrides the default filter.
fn init_logging(config: &AppConfig) -> Result<()> {
    let file = File::create(&config.log_file)
        .with_context(|| format!("Failed to create log file {}", config.log_file))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .try_init()
        .context("Failed to initialise logging")?;

    Ok(())
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background colour based on the theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches to the alternate screen buffer and captures the mouse.
///
/// # Errors
///
/// Returns an error if any of these steps fails.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    if let Some(hex) = Theme::to_hex(app.theme.background_colour) {
        util::term::set_terminal_bg(&hex).context("Failed to set terminal background")?;
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    util::term::reset_terminal();
    terminal.show_cursor().ok();
}

/// Starts the background threads and runs the event loop until the user
/// quits.
///
/// # Arguments
///
/// * `terminal` - The terminal to draw on.
/// * `app` - The application state.
/// * `task_rx` - The receiving end of the task channel, handed to the worker.
///
/// # Errors
///
/// Returns an error if the event loop fails.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    task_rx: Receiver<AppTask>,
) -> Result<()> {
    // Spawn a background worker to run searches asynchronously.
    tasks::spawn_task_worker(&app.config, task_rx, app.event_tx.clone());

    // Spawn a thread to translate raw terminal events to application events.
    let tx_input = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let event = match event::read() {
                Ok(event) => event,
                Err(e) => {
                    let _ = tx_input.send(AppEvent::FatalError(format!("Failed to read terminal input: {}", e)));
                    break;
                }
            };

            let app_event = match event {
                Event::Key(key) => AppEvent::Key(key),
                Event::Mouse(mouse) => AppEvent::Mouse(mouse),
                Event::Resize(..) => AppEvent::Resize,
                _ => continue,
            };

            if tx_input.send(app_event).is_err() {
                break;
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
