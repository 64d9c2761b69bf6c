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

//! Event routing for the library view.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{Event, KeyCode};
use tracing::debug;
use tui_input::backend::crossterm::EventHandler;

use crate::{
    components::library::{BPM_STEP, LibraryFocus, LibraryView},
    events::{AppEvent, AppEventProcessor},
    model::library::Library,
};

impl AppEventProcessor for LibraryView {
    type Model = Library;

    fn process_event(
        &mut self,
        event: &Event,
        library: &mut Library,
        _event_tx: &Sender<AppEvent>,
    ) -> Result<bool> {
        let Event::Key(key) = event else {
            return Ok(false);
        };

        if self.focus == LibraryFocus::Filter {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.focus = LibraryFocus::List,
                _ => {
                    self.input.handle_event(event);
                    library.filter.text = self.input.value().to_string();
                    self.clamp_selection(library);
                }
            }
            return Ok(true);
        }

        let handled = match key.code {
            KeyCode::Char('/') => {
                self.focus = LibraryFocus::Filter;
                true
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.select_next(library);
                true
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.select_previous();
                true
            }
            KeyCode::Char('f') => {
                self.show_filters = !self.show_filters;
                true
            }
            KeyCode::Char(' ') | KeyCode::Char('l') | KeyCode::Char('d') => {
                self.process_sound_key(key.code, library);
                true
            }
            _ if self.show_filters => self.process_filter_key(key.code, library),
            _ => false,
        };

        Ok(handled)
    }

    fn is_capturing(&self) -> bool {
        self.focus == LibraryFocus::Filter
    }
}

impl LibraryView {
    /// Plays, likes or deletes the selected sound.
    fn process_sound_key(&mut self, code: KeyCode, library: &mut Library) {
        let Some(id) = self.selected_id(library) else {
            return;
        };

        match code {
            KeyCode::Char(' ') => library.toggle_playing(id),
            KeyCode::Char('l') => library.toggle_like(id),
            KeyCode::Char('d') => {
                debug!(id, "deleting sound from library");
                library.delete(id);
            }
            _ => return,
        }

        self.clamp_selection(library);
    }

    /// Adjusts the filters while the filter panel is open. Returns `false` for
    /// keys the panel does not use.
    fn process_filter_key(&mut self, code: KeyCode, library: &mut Library) -> bool {
        match code {
            KeyCode::Char('[') => library.adjust_bpm_min(-BPM_STEP),
            KeyCode::Char(']') => library.adjust_bpm_min(BPM_STEP),
            KeyCode::Char('{') => library.adjust_bpm_max(-BPM_STEP),
            KeyCode::Char('}') => library.adjust_bpm_max(BPM_STEP),
            KeyCode::Char('K') => library.cycle_key(),
            KeyCode::Char('L') => library.toggle_liked_only(),
            KeyCode::Char('R') => library.reset_filters(),
            KeyCode::Char('x') => {
                if let Some(badge) = library.active_filters().last().copied() {
                    library.clear_filter(badge);
                }
            }
            _ => return false,
        }

        self.clamp_selection(library);
        true
    }
}
