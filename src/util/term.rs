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

//! Terminal environment and recovery utilities.
//!
//! This module changes the terminal emulator's background colour using OSC
//! (Operating System Command) escape sequences, and puts the terminal back
//! into its normal state on exit or panic.
//!
//! # Compatibility
//!
//! The background functions rely on the terminal emulator supporting OSC 11
//! and OSC 111. Most modern terminals (XTerm, iTerm2, Alacritty, Kitty) do;
//! others ignore the sequences.

use std::{
    io::{self, Write},
    panic,
};

use crossterm::{
    event::DisableMouseCapture,
    execute,
    terminal::{LeaveAlternateScreen, disable_raw_mode},
};

/// Sets the terminal background colour using an OSC 11 escape sequence.
///
/// # Arguments
///
/// * `hex_color` - The colour as a CSS-style hex string (e.g. `"#181626"`).
///
/// # Errors
///
/// Returns an error if writing to or flushing `stdout` fails.
pub(crate) fn set_terminal_bg(hex_color: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "\x1b]11;{}\x07", hex_color)?;
    stdout.flush()
}

/// Resets the terminal background to the user's own colour with OSC 111.
///
/// # Errors
///
/// Returns an error if writing to or flushing `stdout` fails.
pub(crate) fn reset_terminal_bg() -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "\x1b]111\x07")?;
    stdout.flush()
}

/// Puts the terminal back into its normal state.
///
/// Every step is attempted even if an earlier one fails.
pub(crate) fn reset_terminal() {
    disable_raw_mode().ok();
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen).ok();
    reset_terminal_bg().ok();
}

/// Restores the terminal before a panic message is printed, so the message
/// is readable and the shell is usable afterwards.
pub(crate) fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        reset_terminal();
        default_hook(info);
    }));
}
