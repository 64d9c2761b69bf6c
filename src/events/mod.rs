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

//! Application event distribution and orchestration.
//!
//! This module defines the central event-handling logic for the application,
//! bridging the gap between user input (keyboard and mouse), background
//! updates (search tasks, playback timers) and the UI rendering pipeline.
//!
//! # Architecture
//!
//! The system follows a reactive event-loop pattern:
//!
//! 1. **Capture**: Events are received via the [`AppEvent`] enum through an
//!    asynchronous channel.
//! 2. **Process**: The [`process_events`] function updates the [`App`] state,
//!    sends tasks to the background worker and drives the playback
//!    controller. Handlers are the only callers of playback operations.
//! 3. **Render**: After each event is processed, the UI is re-drawn using the
//!    `ratatui` terminal.

mod handlers;
use handlers::*;

use std::{io::Stdout, sync::mpsc::Sender};

use anyhow::{Result, anyhow};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent};
use ratatui::{Terminal, prelude::CrosstermBackend};
use tracing::{debug, error};

use crate::{
    App, MainView,
    model::{MusicalKey, SearchRequest, SearchResult, SoundId, search::RequestId},
    playback::Generation,
    render::draw,
};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,

    Tick,
    PlaybackTick(Generation),

    SetMainView(MainView),
    ToggleSidebar,

    SubmitSearch(SearchRequest),
    SearchFor(String),
    RetrySearch,
    SearchResultsReady(RequestId, Vec<SearchResult>),
    SetSearchBpm(u32),
    SetSearchKey(MusicalKey),

    TogglePlayback(SoundId),
    SeekPlayback(SoundId, f64),
    SeekPlaybackBy(SoundId, f64),
    SeekCurrent(f64),

    ToggleLike(SoundId),

    SaveConfig,

    ExitApplication,

    Error(String),
    FatalError(String),
}

/// Implemented by views that consume terminal input.
///
/// Returns `Ok(true)` if the view consumed the event.
pub(crate) trait AppEventProcessor {
    type Model;

    fn process_event(
        &mut self,
        event: &Event,
        model: &mut Self::Model,
        event_tx: &Sender<AppEvent>,
    ) -> Result<bool>;

    /// Whether the view is editing text and must see every key first.
    fn is_capturing(&self) -> bool {
        false
    }
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until an exit event is received or the event channel
/// is closed.
///
/// # Errors
///
/// Returns an error if drawing fails, a background worker reports a fatal
/// error, or the task worker has gone away.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            debug!("exit requested");
            break;
        }

        match event {
            AppEvent::Key(key) => process_key_event(app, key)?,
            AppEvent::Mouse(mouse) => process_mouse_event(app, mouse)?,
            AppEvent::PlaybackTick(generation) => {
                // Stale ticks change nothing, so skip the redraw
                if !handle_playback_tick(app, generation) {
                    continue;
                }
            }
            AppEvent::SetMainView(view) => handle_set_main_view(app, view),
            AppEvent::ToggleSidebar => handle_toggle_sidebar(app),
            AppEvent::SubmitSearch(request) => handle_submit_search(app, request)?,
            AppEvent::SearchFor(query) => handle_search_for(app, query)?,
            AppEvent::RetrySearch => handle_retry_search(app)?,
            AppEvent::SearchResultsReady(id, results) => handle_search_results_ready(app, id, results),
            AppEvent::SetSearchBpm(bpm) => handle_set_search_bpm(app, bpm),
            AppEvent::SetSearchKey(key) => handle_set_search_key(app, key),
            AppEvent::TogglePlayback(id) => handle_toggle_playback(app, id),
            AppEvent::SeekPlayback(id, percent) => handle_seek_playback(app, id, percent),
            AppEvent::SeekPlaybackBy(id, delta) => handle_seek_playback_by(app, id, delta),
            AppEvent::SeekCurrent(percent) => handle_seek_current(app, percent),
            AppEvent::ToggleLike(id) => handle_toggle_like(app, id),
            AppEvent::SaveConfig => handle_save_config(app),
            AppEvent::Error(message) => handle_error(app, message),
            AppEvent::FatalError(message) => {
                error!(%message, "fatal error");
                return Err(anyhow!(message));
            }
            AppEvent::Resize | AppEvent::Tick | AppEvent::ExitApplication => {}
        }

        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

/// Maps keyboard input to application actions.
///
/// Keys go to the command line first when it is open, then to a view that is
/// editing text, then to the global bindings, and finally to the active view.
/// The command line cannot be opened while a view is editing text.
///
/// # Errors
///
/// Returns an error if an event or task cannot be sent.
fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    let capturing = match app.main_view {
        MainView::Search => app.search_view.is_capturing(),
        MainView::Library => app.library_view.is_capturing(),
    };

    let event = Event::Key(key);
    if (app.commander.active() || !capturing) && app.commander.handle_event(&event, &app.event_tx) {
        return Ok(());
    }

    // Any other key dismisses the last error
    app.status = None;

    if !capturing && process_global_key_event(app, key)? {
        return Ok(());
    }

    match app.main_view {
        MainView::Search => app
            .search_view
            .process_event(&event, &mut app.search, &app.event_tx)?,
        MainView::Library => app
            .library_view
            .process_event(&event, &mut app.library, &app.event_tx)?,
    };

    Ok(())
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,
        KeyCode::Char('1') => app.event_tx.send(AppEvent::SetMainView(MainView::Search))?,
        KeyCode::Char('2') => app.event_tx.send(AppEvent::SetMainView(MainView::Library))?,
        KeyCode::Char('b') => app.event_tx.send(AppEvent::ToggleSidebar)?,
        _ => return Ok(false),
    }

    Ok(true)
}

fn process_mouse_event(app: &mut App, mouse: MouseEvent) -> Result<()> {
    if app.main_view == MainView::Search {
        app.search_view.process_mouse(mouse, &app.event_tx)?;
    }

    Ok(())
}
