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

//! Library view: saved sounds with client-side filters.

mod event;
mod render;

use ratatui::widgets::ListState;
use tui_input::Input;

use crate::model::{SoundId, library::Library};

/// Tempo filter step for the bound adjusters.
const BPM_STEP: i32 = 5;

/// The part of the library view that receives keys.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum LibraryFocus {
    List,
    Filter,
}

/// Presentation state of the library view: the filter input, whether the
/// filter panel is open and the list selection.
pub(crate) struct LibraryView {
    pub(crate) input: Input,
    pub(crate) focus: LibraryFocus,
    pub(crate) show_filters: bool,
    list_state: ListState,
}

impl LibraryView {
    pub(crate) fn new() -> Self {
        Self {
            input: Input::default(),
            focus: LibraryFocus::List,
            show_filters: false,
            list_state: ListState::default().with_selected(Some(0)),
        }
    }

    /// The id of the highlighted sound among those passing the filters.
    pub(crate) fn selected_id(&self, library: &Library) -> Option<SoundId> {
        let index = self.list_state.selected()?;
        library.filtered().get(index).map(|s| s.id)
    }

    /// Keeps the selection within the filtered list after it changes.
    fn clamp_selection(&mut self, library: &Library) {
        let len = library.filtered().len();
        let selected = match self.list_state.selected() {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
        self.list_state.select(selected);
    }

    fn select_next(&mut self, library: &Library) {
        let len = library.filtered().len();
        if len == 0 {
            return;
        }
        let i = self.list_state.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.list_state.select(Some(i));
    }

    fn select_previous(&mut self) {
        let i = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(i));
    }
}
