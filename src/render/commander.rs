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

//! Render the status line.
//!
//! The bottom row doubles as the command line, the place errors are reported
//! and a reminder of the keys that apply to what has focus.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Paragraph,
};

use crate::{App, MainView, components::SearchFocus};

/// Draws the bottom row: the command line while it is open, otherwise the
/// last error or status message, otherwise key hints for the focused part
/// of the active view.
pub(crate) fn draw_commander(f: &mut Frame, area: Rect, app: &App) {
    let commander = &app.commander;

    let container = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .horizontal_margin(1)
        .split(area);

    if commander.active() {
        let style = Style::default()
            .fg(app.theme.commander_colour)
            .bg(app.theme.gauge_track_colour);

        f.render_widget(Paragraph::new(":").style(style), container[0]);
        f.render_widget(Paragraph::new(commander.input.value()).style(style), container[1]);

        let cursor_x = container[1].x + commander.input.cursor() as u16;
        let cursor_y = container[1].y;
        f.set_cursor_position((cursor_x, cursor_y));
        return;
    }

    let status = match &app.status {
        Some(message) => Paragraph::new(message.as_str()).style(Style::default().fg(app.theme.error_colour)),
        None => Paragraph::new(key_hints(app)).style(Style::default().fg(app.theme.muted_colour)),
    };
    f.render_widget(status, container[1]);
}

fn key_hints(app: &App) -> &'static str {
    match app.main_view {
        MainView::Search => match app.search_view.focus {
            SearchFocus::Input => "Enter search  Tab options  Esc results",
            SearchFocus::Options => "\u{2190}\u{2192} tempo  \u{2191}\u{2193} key  Tab close  / edit query",
            SearchFocus::Results => {
                "Space play  , . seek  < > jump  l like  r retry  e refine  / edit  : command  q quit"
            }
        },
        MainView::Library => {
            "/ filter  Space play  l like  d delete  f filters  b sidebar  : command  q quit"
        }
    }
}
