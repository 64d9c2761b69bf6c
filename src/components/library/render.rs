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
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::{
    components::library::{LibraryFocus, LibraryView},
    model::library::{FilterBadge, Library},
    render::icons::{FAVOURITE, ICON_PAUSE, ICON_PLAY, NOT_FAVOURITE},
    theme::Theme,
    util::format::format_time,
};

impl LibraryView {
    /// Renders the header with its filter badges, the filter input, the
    /// filter panel when open, and the filtered list or an empty-state message.
    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect, library: &Library, theme: &Theme) {
        let filters_height = if self.show_filters { 3 } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(filters_height),
                Constraint::Min(0),
            ])
            .split(area);

        draw_header(f, chunks[0], library, theme);
        self.draw_filter_input(f, chunks[1], theme);
        if self.show_filters {
            draw_filter_panel(f, chunks[2], library, theme);
        }
        self.draw_sounds(f, chunks[3], library, theme);
    }

    fn draw_filter_input(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let focused = self.focus == LibraryFocus::Filter;
        let border_style = if focused {
            Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.border_colour)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Filter ")
            .border_style(border_style)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);

        f.render_widget(
            Paragraph::new(self.input.value()).fg(theme.text_colour).block(block),
            area,
        );

        if focused {
            let cursor_x = inner.x + self.input.visual_cursor() as u16;
            f.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
        }
    }

    fn draw_sounds(&mut self, f: &mut Frame, area: Rect, library: &Library, theme: &Theme) {
        let sounds = library.filtered();

        if sounds.is_empty() {
            let message = Paragraph::new(library.empty_message())
                .fg(theme.muted_colour)
                .wrap(Wrap { trim: true })
                .block(Block::default().padding(Padding::uniform(1)));
            f.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = sounds
            .iter()
            .map(|sound| {
                let playing = library.playing == Some(sound.id);
                let icon = if playing {
                    Span::styled(format!(" {} ", ICON_PAUSE), Style::default().fg(theme.accent_colour))
                } else {
                    Span::styled(format!(" {} ", ICON_PLAY), Style::default().fg(theme.muted_colour))
                };

                let heart = if sound.liked {
                    Span::styled(FAVOURITE, Style::default().fg(theme.liked_colour))
                } else {
                    Span::styled(NOT_FAVOURITE, Style::default().fg(theme.muted_colour))
                };

                let title = Line::from(vec![
                    icon,
                    Span::styled(sound.name.as_str(), Style::default().fg(theme.text_colour).add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    heart,
                ]);

                let details = Line::from(vec![
                    Span::raw("   "),
                    Span::styled(format!("\"{}\"", sound.query), Style::default().fg(theme.muted_colour).italic()),
                    Span::styled(format!("  {} BPM", sound.bpm), Style::default().fg(theme.muted_colour)),
                    Span::styled(format!("  {}", sound.key), Style::default().fg(theme.secondary_colour)),
                    Span::styled(
                        format!("  {}", format_time(f64::from(sound.duration_secs))),
                        Style::default().fg(theme.muted_colour),
                    ),
                    Span::styled(format!("  {}", sound.date), Style::default().fg(theme.muted_colour)),
                ]);

                ListItem::new(vec![title, details])
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().bg(theme.highlight_bg).fg(theme.highlight_fg));

        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}

fn draw_header(f: &mut Frame, area: Rect, library: &Library, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border_colour))
        .padding(Padding::horizontal(1));

    let count = library.filtered().len();
    let mut spans = vec![Span::styled(
        format!("Library | {} of {} sounds", count, library.sounds.len()),
        Style::default().fg(theme.text_colour).add_modifier(Modifier::BOLD),
    )];

    for badge in library.active_filters() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!(" {} ", badge_label(badge)),
            Style::default().fg(theme.highlight_fg).bg(theme.accent_colour),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn draw_filter_panel(f: &mut Frame, area: Rect, library: &Library, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Filters ")
        .border_style(Style::default().fg(theme.border_colour))
        .padding(Padding::horizontal(1));

    let (min, max) = library.filter.bpm_range;
    let key = library
        .filter
        .key
        .map_or("Any".to_string(), |k| k.to_string());
    let liked = if library.filter.liked_only { "yes" } else { "no" };

    let value = Style::default().fg(theme.accent_colour);
    let hint = Style::default().fg(theme.muted_colour);

    let line = Line::from(vec![
        Span::raw("BPM "),
        Span::styled(format!("{}-{}", min, max), value),
        Span::styled(" [ ] { }", hint),
        Span::raw("   Key "),
        Span::styled(key, value),
        Span::styled(" K", hint),
        Span::raw("   Liked only "),
        Span::styled(liked, value),
        Span::styled(" L", hint),
        Span::styled("   R reset  x clear last", hint),
    ]);

    f.render_widget(Paragraph::new(line).block(block), area);
}

fn badge_label(badge: FilterBadge) -> String {
    match badge {
        FilterBadge::Bpm(min, max) => format!("{}-{} BPM", min, max),
        FilterBadge::Key(key) => format!("Key {}", key),
        FilterBadge::LikedOnly => "Liked".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::model::{MusicalKey, mock};

    fn render(view: &mut LibraryView, library: &Library) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                view.draw(f, area, library, &Theme::default());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn header_counts_sounds_and_shows_badges() {
        let mut library = Library::new(mock::library_sounds(), (60, 140));
        library.filter.key = Some(MusicalKey::G);
        let mut view = LibraryView::new();

        let text = render(&mut view, &library);

        assert!(text.contains("Library | 1 of 8 sounds"));
        assert!(text.contains("Key G"));
        assert!(text.contains("Emotional Strings"));
        assert!(!text.contains("Urban Night"));
    }

    #[test]
    fn empty_states_explain_themselves() {
        let mut library = Library::new(vec![], (60, 140));
        let mut view = LibraryView::new();
        assert!(render(&mut view, &library).contains("Your library is empty."));

        library = Library::new(mock::library_sounds(), (60, 140));
        library.filter.text = "nothing like this".to_string();
        assert!(render(&mut view, &library).contains("Try adjusting your filters"));
    }

    #[test]
    fn badge_labels_describe_the_filter() {
        assert_eq!(badge_label(FilterBadge::Bpm(70, 120)), "70-120 BPM");
        assert_eq!(badge_label(FilterBadge::Key(MusicalKey::ASharp)), "Key A#");
        assert_eq!(badge_label(FilterBadge::LikedOnly), "Liked");
    }
}
