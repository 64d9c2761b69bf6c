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

//! Command-line input logic and state management.
//!
//! This module implements a command-line component opened with `:`. It owns a
//! text input, and when a command is submitted it parses the buffer and
//! dispatches the corresponding application event. Commands that fail to
//! parse are reported on the status line.

use std::sync::mpsc::Sender;

use crossterm::event::{Event, KeyCode};
use thiserror::Error;
use tracing::debug;
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{
    MainView,
    events::AppEvent,
    model::{MusicalKey, ParseKeyError},
};

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    Quit,
    Search(String),
    SearchView,
    Retry,
    Library,
    Seek(f64),
    Bpm(u32),
    Key(MusicalKey),
    Save,
    ToggleSidebar,
}

/// Why a command line could not be parsed. The message is shown on the
/// status line.
#[derive(Debug, Error, PartialEq)]
pub(crate) enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("{0} needs an argument")]
    MissingArgument(&'static str),

    #[error("not a number: {0}")]
    InvalidNumber(String),

    #[error(transparent)]
    InvalidKey(#[from] ParseKeyError),
}

/// Parses one command line.
///
/// Words are separated by any amount of whitespace; a search query is
/// rejoined with single spaces.
///
/// # Arguments
///
/// * `buffer` - The text typed after the `:` prompt.
///
/// # Errors
///
/// Returns a [`CommandError`] describing why the line is not a command.
pub(crate) fn parse_command(buffer: &str) -> Result<Command, CommandError> {
    let parts: Vec<&str> = buffer.split_whitespace().collect();

    let command = match parts.as_slice() {
        ["q"] => Command::Quit,

        ["search" | "s"] => Command::SearchView,
        ["search" | "s", query @ ..] => Command::Search(query.join(" ")),

        ["retry"] => Command::Retry,
        ["lib"] => Command::Library,
        ["sb"] => Command::ToggleSidebar,
        ["w"] => Command::Save,

        ["seek"] => return Err(CommandError::MissingArgument("seek")),
        ["seek", percent] => Command::Seek(
            percent
                .parse()
                .map_err(|_| CommandError::InvalidNumber(percent.to_string()))?,
        ),

        ["bpm"] => return Err(CommandError::MissingArgument("bpm")),
        ["bpm", bpm] => Command::Bpm(
            bpm.parse()
                .map_err(|_| CommandError::InvalidNumber(bpm.to_string()))?,
        ),

        ["key"] => return Err(CommandError::MissingArgument("key")),
        ["key", key] => Command::Key(key.parse()?),

        [] => return Err(CommandError::Unknown(String::new())),
        _ => return Err(CommandError::Unknown(buffer.trim().to_string())),
    };

    Ok(command)
}

/// The `:` command line and its text input.
pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Handles a terminal event while the command line is open, or opens it
    /// on `:`.
    ///
    /// Returns `true` if the commander consumed the event.
    ///
    /// # Arguments
    ///
    /// * `event` - The terminal event to handle.
    /// * `event_tx` - Receives the event for a submitted command, or an
    ///   [`AppEvent::Error`] if it did not parse.
    pub(crate) fn handle_event(&mut self, event: &Event, event_tx: &Sender<AppEvent>) -> bool {
        let Event::Key(key_event) = event else {
            return false;
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return true;
            }
            return false;
        }

        match key_event.code {
            KeyCode::Esc => {
                self.close();
            }

            KeyCode::Enter => {
                let buffer = self.input.value().trim().to_string();
                self.close();

                if !buffer.is_empty() {
                    let event = match parse_command(&buffer) {
                        Ok(command) => command_event(command),
                        Err(e) => AppEvent::Error(e.to_string()),
                    };
                    debug!(%buffer, ?event, "command");
                    let _ = event_tx.send(event);
                }
            }

            _ => {
                self.input.handle_event(event);
            }
        }

        true
    }

    fn close(&mut self) {
        self.active = false;
        self.input.reset();
    }
}

fn command_event(command: Command) -> AppEvent {
    match command {
        Command::Quit => AppEvent::ExitApplication,
        Command::Search(query) => AppEvent::SearchFor(query),
        Command::SearchView => AppEvent::SetMainView(MainView::Search),
        Command::Retry => AppEvent::RetrySearch,
        Command::Library => AppEvent::SetMainView(MainView::Library),
        Command::Seek(percent) => AppEvent::SeekCurrent(percent),
        Command::Bpm(bpm) => AppEvent::SetSearchBpm(bpm),
        Command::Key(key) => AppEvent::SetSearchKey(key),
        Command::Save => AppEvent::SaveConfig,
        Command::ToggleSidebar => AppEvent::ToggleSidebar,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(parse_command("q"), Ok(Command::Quit));
        assert_eq!(
            parse_command("s  warm   pads "),
            Ok(Command::Search("warm pads".to_string()))
        );
        assert_eq!(parse_command("search"), Ok(Command::SearchView));
        assert_eq!(parse_command("seek 42.5"), Ok(Command::Seek(42.5)));
        assert_eq!(parse_command("seek -10"), Ok(Command::Seek(-10.0)));
        assert_eq!(parse_command("bpm 128"), Ok(Command::Bpm(128)));
        assert_eq!(parse_command("key f#"), Ok(Command::Key(MusicalKey::FSharp)));
        assert_eq!(parse_command("w"), Ok(Command::Save));
    }

    #[test]
    fn reports_bad_commands() {
        assert_eq!(
            parse_command("play"),
            Err(CommandError::Unknown("play".to_string()))
        );
        assert_eq!(parse_command("seek"), Err(CommandError::MissingArgument("seek")));
        assert_eq!(
            parse_command("bpm fast"),
            Err(CommandError::InvalidNumber("fast".to_string()))
        );
        assert!(matches!(
            parse_command("key H"),
            Err(CommandError::InvalidKey(_))
        ));
    }

    #[test]
    fn typed_command_is_dispatched_on_enter() {
        let (event_tx, event_rx) = mpsc::channel();
        let mut commander = Commander::new();

        assert!(!commander.handle_event(&key(KeyCode::Char('x')), &event_tx));
        assert!(commander.handle_event(&key(KeyCode::Char(':')), &event_tx));
        assert!(commander.active());

        for c in "bpm 90".chars() {
            assert!(commander.handle_event(&key(KeyCode::Char(c)), &event_tx));
        }
        assert_eq!(commander.input.value(), "bpm 90");

        assert!(commander.handle_event(&key(KeyCode::Enter), &event_tx));
        assert!(!commander.active());
        assert!(matches!(event_rx.try_recv(), Ok(AppEvent::SetSearchBpm(90))));
    }

    #[test]
    fn escape_discards_the_command() {
        let (event_tx, event_rx) = mpsc::channel();
        let mut commander = Commander::new();

        commander.handle_event(&key(KeyCode::Char(':')), &event_tx);
        commander.handle_event(&key(KeyCode::Char('q')), &event_tx);
        commander.handle_event(&key(KeyCode::Esc), &event_tx);

        assert!(!commander.active());
        assert_eq!(commander.input.value(), "");
        assert!(event_rx.try_recv().is_err());
    }

    #[test]
    fn parse_errors_become_status_messages() {
        let (event_tx, event_rx) = mpsc::channel();
        let mut commander = Commander::new();

        commander.handle_event(&key(KeyCode::Char(':')), &event_tx);
        commander.handle_event(&key(KeyCode::Char('z')), &event_tx);
        commander.handle_event(&key(KeyCode::Enter), &event_tx);

        assert!(matches!(event_rx.try_recv(), Ok(AppEvent::Error(m)) if m == "unknown command: z"));
    }
}
