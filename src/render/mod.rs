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

//! Top-level layout: sidebar, active view and status line.

mod commander;
pub(crate) mod icons;
mod sidebar;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
};

use crate::{
    App, MainView,
    render::{commander::draw_commander, sidebar::draw_sidebar},
};

const SIDEBAR_WIDTH: u16 = 16;
const SIDEBAR_COLLAPSED_WIDTH: u16 = 5;

/// Renders the whole user interface for one frame.
///
/// The sidebar runs down the left, the active view fills the rest and the
/// bottom row holds the command line or status.
///
/// # Arguments
///
/// * `f` - The current terminal frame used for drawing.
/// * `app` - The application state. It is mutable so the views can record
///   list scroll positions and click areas while drawing.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.background_colour)),
        area,
    );

    // Outer layout: main, footer
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let sidebar_width = if app.sidebar_collapsed {
        SIDEBAR_COLLAPSED_WIDTH
    } else {
        SIDEBAR_WIDTH
    };

    // Main layout: sidebar, content
    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
        .horizontal_margin(1)
        .spacing(1)
        .split(outer[0]);

    draw_sidebar(f, main[0], app);

    match app.main_view {
        MainView::Search => {
            let playback = app.playback.snapshot();
            app.search_view.draw(
                f,
                main[1],
                &app.search,
                &playback,
                &app.theme,
                app.config.playback.countdown,
            );
        }
        MainView::Library => app.library_view.draw(f, main[1], &app.library, &app.theme),
    }

    draw_commander(f, outer[1], app);
}
