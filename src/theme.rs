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

//! Visual styling and colour configuration for the TUI.
//!
//! This module defines the application's colour palette, shared by the
//! sidebar, both views and the status line, and converts colours to the
//! hexadecimal form used for terminal emulator styling.

use ratatui::style::Color;

/// The colour palette used when drawing every part of the interface.
#[derive(Clone, Copy)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) gauge_track_colour: Color,
    pub(crate) commander_colour: Color,

    pub(crate) text_colour: Color,
    pub(crate) secondary_colour: Color,
    pub(crate) muted_colour: Color,
    pub(crate) liked_colour: Color,
    pub(crate) error_colour: Color,

    pub(crate) highlight_fg: Color,
    pub(crate) highlight_bg: Color,
}

impl Default for Theme {
    // Returns the standard application theme.
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    // Constructs the default theme.
    pub(crate) const fn default_theme() -> Self {
        Self {
            background_colour: Color::Rgb(24, 22, 38),
            accent_colour: Color::Rgb(139, 92, 246),
            border_colour: Color::Rgb(88, 84, 110),
            gauge_track_colour: Color::Rgb(44, 40, 64),
            commander_colour: Color::Rgb(255, 255, 255),

            text_colour: Color::Rgb(255, 255, 255),
            secondary_colour: Color::Rgb(179, 157, 219),
            muted_colour: Color::Rgb(162, 161, 166),
            liked_colour: Color::Rgb(244, 63, 94),
            error_colour: Color::Rgb(248, 113, 113),

            highlight_fg: Color::Rgb(255, 255, 255),
            highlight_bg: Color::Rgb(76, 29, 149),
        }
    }

    /// Converts a [`ratatui::style::Color`] into a CSS-style hexadecimal
    /// string.
    ///
    /// This is primarily used to set the terminal emulator's background color
    /// via escape sequences. Returns `None` for colours that are not
    /// [`Color::Rgb`].
    ///
    /// # Arguments
    ///
    /// * `colour` - The Ratatui colour to convert.
    pub(crate) fn to_hex(colour: Color) -> Option<String> {
        match colour {
            Color::Rgb(r, g, b) => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_colours_convert_to_hex() {
        assert_eq!(Theme::to_hex(Color::Rgb(24, 22, 38)).as_deref(), Some("#181626"));
        assert_eq!(Theme::to_hex(Color::Blue), None);
    }
}
