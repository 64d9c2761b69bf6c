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

//! Render the sidebar.
//!
//! The sidebar lists the main views with their shortcut keys and marks the
//! active one.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    App, MainView,
    render::icons::{ICON_LIBRARY, ICON_SEARCH},
};

const ENTRIES: [(MainView, &str, &str, &str); 2] = [
    (MainView::Search, ICON_SEARCH, "1", "Search"),
    (MainView::Library, ICON_LIBRARY, "2", "Library"),
];

/// Draws the view switcher, as titled entries or, when collapsed, icons only.
pub(crate) fn draw_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let mut block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(theme.border_colour));
    if !app.sidebar_collapsed {
        block = block.title(Span::styled(
            " Cue ",
            Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD),
        ));
    }

    let mut lines = vec![Line::raw("")];
    for (view, icon, shortcut, label) in ENTRIES {
        let style = if app.main_view == view {
            Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted_colour)
        };

        let text = if app.sidebar_collapsed {
            format!(" {} ", icon)
        } else {
            format!(" {} {} {} ", icon, shortcut, label)
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}
