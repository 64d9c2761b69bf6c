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

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::{
    App, MainView, config,
    model::{MusicalKey, SearchRequest, SearchResult, SoundId, search::RequestId},
    playback::Generation,
    tasks::AppTask,
};

pub(super) fn handle_playback_tick(app: &mut App, generation: Generation) -> bool {
    app.playback.tick(generation)
}

pub(super) fn handle_set_main_view(app: &mut App, main_view: MainView) {
    app.main_view = main_view;
}

pub(super) fn handle_toggle_sidebar(app: &mut App) {
    app.sidebar_collapsed = !app.sidebar_collapsed;
}

pub(super) fn handle_submit_search(app: &mut App, request: SearchRequest) -> Result<()> {
    if request.query.trim().is_empty() {
        return Ok(());
    }

    let request_id = app.search.begin_request(&request);
    info!(request_id, query = %request.query, bpm = request.bpm, key = %request.key, "searching");
    app.task_tx.send(AppTask::Search(request_id, request))?;
    app.main_view = MainView::Search;

    Ok(())
}

/// Searches for `query` with the current search options.
pub(super) fn handle_search_for(app: &mut App, query: String) -> Result<()> {
    let request = app.search.request(&query);
    app.search_view.set_query(&request.query);
    handle_submit_search(app, request)
}

/// Hides the current results, stops playback and runs the last query again.
pub(super) fn handle_retry_search(app: &mut App) -> Result<()> {
    if app.search.query.is_empty() {
        return Ok(());
    }

    let query = app.search.query.clone();
    let request = app.search.request(&query);
    let request_id = app.search.begin_request(&request);

    app.search.hide_results();
    app.playback.reset(std::iter::empty());

    info!(request_id, query = %request.query, "retrying search");
    app.task_tx.send(AppTask::RetrySearch(request_id, request))?;

    Ok(())
}

/// Installs new results, clearing all playback state before they are shown.
pub(super) fn handle_search_results_ready(
    app: &mut App,
    request_id: RequestId,
    results: Vec<SearchResult>,
) {
    if !app.search.accept_results(request_id, results) {
        debug!(request_id, "discarding results of superseded search");
        return;
    }

    app.playback
        .reset(app.search.results().iter().map(|r| (r.id, r.duration_secs)));
    app.search_view.reset_selection(&app.search);
}

pub(super) fn handle_set_search_bpm(app: &mut App, bpm: u32) {
    app.search.set_bpm(bpm);
}

pub(super) fn handle_set_search_key(app: &mut App, key: MusicalKey) {
    app.search.key = key;
}

pub(super) fn handle_toggle_playback(app: &mut App, id: SoundId) {
    app.playback.play(id);
    debug!(
        id,
        playing = app.playback.active() == Some(id),
        position = app.playback.position(id),
        elapsed = app.playback.current_time(id),
        "playback toggled"
    );
}

pub(super) fn handle_seek_playback(app: &mut App, id: SoundId, percent: f64) {
    app.playback.seek_to(id, percent);
}

pub(super) fn handle_seek_playback_by(app: &mut App, id: SoundId, delta: f64) {
    app.playback.seek_by(id, delta);
}

/// Seeks the playing track, or the selected result if nothing is playing.
pub(super) fn handle_seek_current(app: &mut App, percent: f64) {
    let target = app
        .playback
        .active()
        .or_else(|| app.search_view.selected_id(&app.search));

    if let Some(id) = target {
        app.playback.seek_to(id, percent);
    }
}

pub(super) fn handle_toggle_like(app: &mut App, id: SoundId) {
    app.search.toggle_like(id);
}

/// Stores the current search options as the defaults for the next session.
pub(super) fn handle_save_config(app: &mut App) {
    app.config.search.default_bpm = app.search.bpm;
    app.config.search.default_key = app.search.key;

    match config::save_config(&app.config) {
        Ok(()) => {
            info!("configuration saved");
            app.status = Some("Configuration saved".to_string());
        }
        Err(e) => handle_error(app, e.to_string()),
    }
}

pub(super) fn handle_error(app: &mut App, message: String) {
    warn!(%message, "error");
    app.status = Some(message);
}
