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

//! Search view: query input, options panel and result cards.
//!
//! The view keeps only presentation state. Result data lives in
//! [`Search`](crate::model::search::Search) and playback progress in the
//! playback controller; anything that changes playback is sent as an
//! [`AppEvent`](crate::events::AppEvent) so the event handlers stay the only
//! callers of the controller.

mod event;
mod render;

use ratatui::layout::Rect;
use tui_input::Input;

use crate::model::{SoundId, search::Search};

/// Seek step for `,`/`.`, in percentage points.
const SEEK_STEP: f64 = 5.0;

/// Seek step for `<`/`>`, in percentage points.
const SEEK_JUMP: f64 = 20.0;

/// The part of the search view that receives keys.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum SearchFocus {
    Input,
    Options,
    Results,
}

/// Presentation state of the search view.
pub(crate) struct SearchView {
    pub(crate) input: Input,
    pub(crate) focus: SearchFocus,
    selected: usize,

    // Screen areas from the last draw, used to map mouse clicks
    timelines: Vec<(SoundId, Rect)>,
    play_buttons: Vec<(SoundId, Rect)>,
}

impl SearchView {
    pub(crate) fn new() -> Self {
        Self {
            input: Input::default(),
            focus: SearchFocus::Input,
            selected: 0,
            timelines: vec![],
            play_buttons: vec![],
        }
    }

    /// The id of the highlighted result, or `None` when no results are shown.
    pub(crate) fn selected_id(&self, search: &Search) -> Option<SoundId> {
        search.results().get(self.selected).map(|r| r.id)
    }

    /// Selects the first result of a freshly installed result set.
    pub(crate) fn reset_selection(&mut self, search: &Search) {
        self.selected = 0;
        if self.focus == SearchFocus::Input && !search.results().is_empty() {
            self.focus = SearchFocus::Results;
        }
    }

    /// Replaces the text in the query input.
    pub(crate) fn set_query(&mut self, query: &str) {
        self.input = Input::new(query.to_string());
    }

    /// Puts the last query back into the input for editing.
    pub(crate) fn begin_refine(&mut self, search: &Search) {
        self.set_query(&search.query);
        self.focus = SearchFocus::Input;
    }

    fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

/// Maps a click at `column` within a timeline to a position percentage.
///
/// The result is not clamped; the playback controller clamps seeks.
pub(crate) fn click_percent(timeline: Rect, column: u16) -> f64 {
    if timeline.width == 0 {
        return 0.0;
    }
    (f64::from(column) - f64::from(timeline.x)) / f64::from(timeline.width) * 100.0
}
