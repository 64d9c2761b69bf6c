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

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{
    components::search::{SearchFocus, SearchView},
    model::{MAX_BPM, MIN_BPM, SearchResult, search::Search},
    playback::PlaybackSnapshot,
    render::icons::{FAVOURITE, ICON_PAUSE, ICON_PLAY, NOT_FAVOURITE},
    theme::Theme,
    util::format::format_time,
};

const CARD_HEIGHT: u16 = 3;

impl SearchView {
    /// Renders the query input, the options panel when open, and one card per
    /// result.
    ///
    /// The screen areas of each card's play button and timeline are recorded
    /// so later mouse clicks can be mapped back to a track.
    ///
    /// # Arguments
    ///
    /// * `f` - The current terminal frame used for drawing.
    /// * `area` - The area given to the view.
    /// * `search` - The options and results to show.
    /// * `playback` - The playback state for this frame.
    /// * `theme` - The colour palette.
    /// * `countdown` - Label each timeline with the time remaining rather than
    ///   the time elapsed.
    pub(crate) fn draw(
        &mut self,
        f: &mut Frame,
        area: Rect,
        search: &Search,
        playback: &PlaybackSnapshot,
        theme: &Theme,
        countdown: bool,
    ) {
        let options_height = if search.show_options { 4 } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(options_height),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(area);

        self.draw_input(f, chunks[0], theme);
        if search.show_options {
            self.draw_options(f, chunks[1], search, theme);
        }
        draw_header(f, chunks[2], search, theme);
        self.draw_results(f, chunks[3], search, playback, theme, countdown);
    }

    fn draw_input(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let focused = self.focus == SearchFocus::Input;
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Describe a sound ")
            .border_style(focus_style(focused, theme))
            .padding(Padding::horizontal(1));

        let inner = block.inner(area);
        let scroll = self.input.visual_scroll(inner.width.saturating_sub(1) as usize);

        let text = Paragraph::new(self.input.value())
            .scroll((0, scroll as u16))
            .fg(theme.text_colour)
            .block(block);
        f.render_widget(text, area);

        if focused {
            let cursor_x = inner.x + self.input.visual_cursor().saturating_sub(scroll) as u16;
            f.set_cursor_position((cursor_x, inner.y));
        }
    }

    fn draw_options(&self, f: &mut Frame, area: Rect, search: &Search, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Options ")
            .border_style(focus_style(self.focus == SearchFocus::Options, theme))
            .padding(Padding::horizontal(1));

        let inner = block.inner(area);
        f.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let bpm_row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(10), Constraint::Min(0)])
            .split(rows[0]);

        f.render_widget(
            Paragraph::new(format!("BPM {:>3}", search.bpm)).fg(theme.accent_colour),
            bpm_row[0],
        );

        let ratio = f64::from(search.bpm - MIN_BPM) / f64::from(MAX_BPM - MIN_BPM);
        let slider = Gauge::default()
            .gauge_style(Style::default().fg(theme.accent_colour).bg(theme.gauge_track_colour))
            .ratio(ratio.clamp(0.0, 1.0))
            .label("")
            .use_unicode(true);
        f.render_widget(slider, bpm_row[1]);

        let key_line = Line::from(vec![
            Span::raw("Key "),
            Span::styled(search.key.as_str(), Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)),
            Span::styled("   \u{2190}\u{2192} tempo  \u{2191}\u{2193} key", Style::default().fg(theme.muted_colour)),
        ]);
        f.render_widget(Paragraph::new(key_line), rows[1]);
    }

    fn draw_results(
        &mut self,
        f: &mut Frame,
        area: Rect,
        search: &Search,
        playback: &PlaybackSnapshot,
        theme: &Theme,
        countdown: bool,
    ) {
        self.timelines.clear();
        self.play_buttons.clear();

        let results = search.results();
        let visible = usize::from(area.height / CARD_HEIGHT);

        // Keep the selected card on screen
        let first = self.selected.saturating_sub(visible.saturating_sub(1));

        for (row, result) in results.iter().enumerate().skip(first).take(visible) {
            let y = area.y + (row - first) as u16 * CARD_HEIGHT;
            let card = Rect::new(area.x, y, area.width, CARD_HEIGHT - 1);
            let selected = self.focus == SearchFocus::Results && row == self.selected;
            self.draw_card(f, card, result, search, playback, theme, countdown, selected);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_card(
        &mut self,
        f: &mut Frame,
        area: Rect,
        result: &SearchResult,
        search: &Search,
        playback: &PlaybackSnapshot,
        theme: &Theme,
        countdown: bool,
        selected: bool,
    ) {
        let lines = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let title = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(16),
                Constraint::Length(3),
            ])
            .split(lines[0]);

        let timeline = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(7)])
            .split(lines[1]);

        let playing = playback.is_active(result.id);
        let icon = if playing { ICON_PAUSE } else { ICON_PLAY };
        let icon_style = if playing {
            Style::default().fg(theme.accent_colour)
        } else {
            Style::default().fg(theme.text_colour)
        };
        f.render_widget(Paragraph::new(format!(" {} ", icon)).style(icon_style), title[0]);
        self.play_buttons.push((result.id, title[0]));

        let name_style = if selected {
            Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_colour).add_modifier(Modifier::BOLD)
        };
        f.render_widget(Paragraph::new(result.name.as_str()).style(name_style), title[1]);

        let details = Line::from(vec![
            Span::styled(format!("{:<3}", result.key.as_str()), Style::default().fg(theme.secondary_colour)),
            Span::styled(format!(" {:>3} BPM", result.bpm), Style::default().fg(theme.muted_colour)),
        ]);
        f.render_widget(Paragraph::new(details).alignment(Alignment::Right), title[2]);

        let heart = if search.is_liked(result.id) {
            Span::styled(FAVOURITE, Style::default().fg(theme.liked_colour))
        } else {
            Span::styled(NOT_FAVOURITE, Style::default().fg(theme.muted_colour))
        };
        f.render_widget(Paragraph::new(Line::from(heart)).alignment(Alignment::Right), title[3]);

        let position = playback.position(result.id);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(theme.accent_colour).bg(theme.gauge_track_colour))
            .ratio((position / 100.0).clamp(0.0, 1.0))
            .label("")
            .use_unicode(true);
        f.render_widget(gauge, timeline[1]);
        self.timelines.push((result.id, timeline[1]));

        let time = playback.display_time(result.id, result.duration_secs, countdown);
        f.render_widget(
            Paragraph::new(format_time(time))
                .alignment(Alignment::Right)
                .fg(theme.muted_colour),
            timeline[2],
        );
    }
}

fn draw_header(f: &mut Frame, area: Rect, search: &Search, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border_colour))
        .padding(Padding::horizontal(1));

    let header = if search.query.is_empty() {
        Line::from(Span::styled(
            "Describe the sound you want and press Enter",
            Style::default().fg(theme.muted_colour),
        ))
    } else if !search.showing_results() {
        Line::from(vec![
            Span::raw("Searching for "),
            Span::styled(search.query.as_str(), Style::default().fg(theme.accent_colour)),
            Span::raw("..."),
        ])
    } else {
        Line::from(vec![
            Span::raw(format!("{} results for ", search.results().len())),
            Span::styled(search.query.as_str(), Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)),
        ])
    };

    f.render_widget(Paragraph::new(header).block(block), area);
}

fn focus_style(focused: bool, theme: &Theme) -> Style {
    if focused {
        Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border_colour)
    }
}
