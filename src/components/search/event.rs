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

//! Event routing for the search view.
//!
//! Keys are interpreted according to which part of the view has focus: the
//! query input, the options panel or the result cards.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use tui_input::backend::crossterm::EventHandler;

use crate::{
    components::search::{SEEK_JUMP, SEEK_STEP, SearchFocus, SearchView, click_percent},
    events::{AppEvent, AppEventProcessor},
    model::search::Search,
};

impl AppEventProcessor for SearchView {
    type Model = Search;

    fn process_event(
        &mut self,
        event: &Event,
        search: &mut Search,
        event_tx: &Sender<AppEvent>,
    ) -> Result<bool> {
        let Event::Key(key) = event else {
            return Ok(false);
        };

        match self.focus {
            SearchFocus::Input => self.process_input_key(event, *key, search, event_tx),
            SearchFocus::Options => Ok(self.process_options_key(*key, search)),
            SearchFocus::Results => self.process_results_key(*key, search, event_tx),
        }
    }

    fn is_capturing(&self) -> bool {
        self.focus == SearchFocus::Input
    }
}

impl SearchView {
    /// Handles a mouse click on a play button or a timeline.
    pub(crate) fn process_mouse(&mut self, mouse: MouseEvent, event_tx: &Sender<AppEvent>) -> Result<()> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(());
        }

        let position = Position::new(mouse.column, mouse.row);

        if let Some((id, _)) = self.play_buttons.iter().find(|(_, area)| area.contains(position)) {
            event_tx.send(AppEvent::TogglePlayback(*id))?;
        } else if let Some((id, timeline)) = self.timelines.iter().find(|(_, area)| area.contains(position)) {
            let percent = click_percent(*timeline, mouse.column);
            event_tx.send(AppEvent::SeekPlayback(*id, percent))?;
        }

        Ok(())
    }

    /// Edits the query. Enter submits it and moves focus to the results; a
    /// blank query is left in place.
    fn process_input_key(
        &mut self,
        event: &Event,
        key: KeyEvent,
        search: &mut Search,
        event_tx: &Sender<AppEvent>,
    ) -> Result<bool> {
        match key.code {
            KeyCode::Enter => {
                let request = search.request(self.input.value());
                if !request.query.is_empty() {
                    event_tx.send(AppEvent::SubmitSearch(request))?;
                    self.focus = SearchFocus::Results;
                }
            }
            KeyCode::Esc => self.focus = SearchFocus::Results,
            KeyCode::Tab => self.toggle_options(search),
            _ => {
                self.input.handle_event(event);
            }
        }

        Ok(true)
    }

    /// Adjusts the tempo with Left/Right and the key with Up/Down.
    fn process_options_key(&mut self, key: KeyEvent, search: &mut Search) -> bool {
        match key.code {
            KeyCode::Left => search.adjust_bpm(-1),
            KeyCode::Right => search.adjust_bpm(1),
            KeyCode::Up => search.cycle_key(false),
            KeyCode::Down => search.cycle_key(true),
            KeyCode::Tab => self.toggle_options(search),
            KeyCode::Esc => self.focus = SearchFocus::Results,
            KeyCode::Char('/') => self.focus = SearchFocus::Input,
            _ => return false,
        }

        true
    }

    /// Moves the selection, or asks for playback, seeking or a like on the
    /// selected card.
    ///
    /// # Errors
    ///
    /// Returns an error if the application event channel is closed.
    fn process_results_key(
        &mut self,
        key: KeyEvent,
        search: &mut Search,
        event_tx: &Sender<AppEvent>,
    ) -> Result<bool> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.select_next(search.results().len());
                return Ok(true);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.select_previous();
                return Ok(true);
            }
            KeyCode::Char('/') => {
                self.focus = SearchFocus::Input;
                return Ok(true);
            }
            KeyCode::Char('e') => {
                self.begin_refine(search);
                return Ok(true);
            }
            KeyCode::Char('r') => {
                event_tx.send(AppEvent::RetrySearch)?;
                return Ok(true);
            }
            KeyCode::Tab => {
                self.toggle_options(search);
                return Ok(true);
            }
            _ => {}
        }

        // The remaining keys act on the selected card
        let Some(id) = self.selected_id(search) else {
            return Ok(false);
        };

        let event = match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => AppEvent::TogglePlayback(id),
            KeyCode::Char(',') => AppEvent::SeekPlaybackBy(id, -SEEK_STEP),
            KeyCode::Char('.') => AppEvent::SeekPlaybackBy(id, SEEK_STEP),
            KeyCode::Char('<') => AppEvent::SeekPlaybackBy(id, -SEEK_JUMP),
            KeyCode::Char('>') => AppEvent::SeekPlaybackBy(id, SEEK_JUMP),
            KeyCode::Home => AppEvent::SeekPlayback(id, 0.0),
            KeyCode::Char('l') => AppEvent::ToggleLike(id),
            _ => return Ok(false),
        };
        event_tx.send(event)?;

        Ok(true)
    }

    fn toggle_options(&mut self, search: &mut Search) {
        search.toggle_options();
        self.focus = if search.show_options {
            SearchFocus::Options
        } else {
            SearchFocus::Results
        };
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};

    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;

    use super::*;
    use crate::{components::search::tests::search_with_results, model::MusicalKey};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn results_view() -> (SearchView, Search, Sender<AppEvent>, Receiver<AppEvent>) {
        let search = search_with_results();
        let mut view = SearchView::new();
        view.reset_selection(&search);
        let (event_tx, event_rx) = mpsc::channel();
        (view, search, event_tx, event_rx)
    }

    #[test]
    fn enter_submits_the_typed_query_with_options() {
        let mut search = Search::new(90, MusicalKey::D);
        let mut view = SearchView::new();
        let (event_tx, event_rx) = mpsc::channel();

        for c in " pads ".chars() {
            view.process_event(&key(KeyCode::Char(c)), &mut search, &event_tx).unwrap();
        }
        view.process_event(&key(KeyCode::Enter), &mut search, &event_tx).unwrap();

        match event_rx.try_recv().unwrap() {
            AppEvent::SubmitSearch(request) => {
                assert_eq!(request.query, "pads");
                assert_eq!(request.bpm, 90);
                assert_eq!(request.key, MusicalKey::D);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(view.focus, SearchFocus::Results);
    }

    #[test]
    fn blank_query_is_not_submitted() {
        let mut search = Search::new(107, MusicalKey::C);
        let mut view = SearchView::new();
        let (event_tx, event_rx) = mpsc::channel();

        view.process_event(&key(KeyCode::Char(' ')), &mut search, &event_tx).unwrap();
        view.process_event(&key(KeyCode::Enter), &mut search, &event_tx).unwrap();

        assert!(event_rx.try_recv().is_err());
        assert!(view.is_capturing());
    }

    #[test]
    fn result_keys_target_the_selected_card() {
        let (mut view, mut search, event_tx, event_rx) = results_view();

        view.process_event(&key(KeyCode::Char('j')), &mut search, &event_tx).unwrap();
        view.process_event(&key(KeyCode::Char(' ')), &mut search, &event_tx).unwrap();
        view.process_event(&key(KeyCode::Char('.')), &mut search, &event_tx).unwrap();
        view.process_event(&key(KeyCode::Char('<')), &mut search, &event_tx).unwrap();
        view.process_event(&key(KeyCode::Home), &mut search, &event_tx).unwrap();

        assert!(matches!(event_rx.try_recv(), Ok(AppEvent::TogglePlayback(2))));
        assert!(matches!(event_rx.try_recv(), Ok(AppEvent::SeekPlaybackBy(2, d)) if d == 5.0));
        assert!(matches!(event_rx.try_recv(), Ok(AppEvent::SeekPlaybackBy(2, d)) if d == -20.0));
        assert!(matches!(event_rx.try_recv(), Ok(AppEvent::SeekPlayback(2, p)) if p == 0.0));
    }

    #[test]
    fn selection_stops_at_the_ends() {
        let (mut view, mut search, event_tx, _event_rx) = results_view();

        view.process_event(&key(KeyCode::Char('k')), &mut search, &event_tx).unwrap();
        assert_eq!(view.selected_id(&search), Some(1));

        for _ in 0..5 {
            view.process_event(&key(KeyCode::Char('j')), &mut search, &event_tx).unwrap();
        }
        assert_eq!(view.selected_id(&search), Some(3));
    }

    #[test]
    fn options_panel_adjusts_search_options() {
        let (mut view, mut search, event_tx, _event_rx) = results_view();

        view.process_event(&key(KeyCode::Tab), &mut search, &event_tx).unwrap();
        assert_eq!(view.focus, SearchFocus::Options);

        view.process_event(&key(KeyCode::Right), &mut search, &event_tx).unwrap();
        view.process_event(&key(KeyCode::Down), &mut search, &event_tx).unwrap();
        assert_eq!(search.bpm, 108);
        assert_eq!(search.key, MusicalKey::CSharp);

        view.process_event(&key(KeyCode::Tab), &mut search, &event_tx).unwrap();
        assert!(!search.show_options);
        assert_eq!(view.focus, SearchFocus::Results);
    }

    #[test]
    fn retry_is_requested_with_r() {
        let (mut view, mut search, event_tx, event_rx) = results_view();
        view.process_event(&key(KeyCode::Char('r')), &mut search, &event_tx).unwrap();
        assert!(matches!(event_rx.try_recv(), Ok(AppEvent::RetrySearch)));
    }

    #[test]
    fn clicking_a_timeline_seeks_proportionally() {
        let (mut view, _search, event_tx, event_rx) = results_view();
        view.timelines = vec![(1, Rect::new(4, 2, 20, 1)), (2, Rect::new(4, 5, 20, 1))];

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 9,
            row: 5,
            modifiers: KeyModifiers::NONE,
        };
        view.process_mouse(click, &event_tx).unwrap();

        assert!(matches!(event_rx.try_recv(), Ok(AppEvent::SeekPlayback(2, p)) if p == 25.0));
    }
}
