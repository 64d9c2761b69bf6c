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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application, the sounds
//! returned by a search and the sounds kept in the user's library, together
//! with the musical key vocabulary shared by search options and library
//! filters.

pub(crate) mod library;
pub(crate) mod mock;
pub(crate) mod search;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifies a sound, unique within the collection it was produced for.
pub(crate) type SoundId = u32;

/// The slowest tempo selectable in search options and library filters.
pub(crate) const MIN_BPM: u32 = 60;

/// The fastest tempo selectable in search options and library filters.
pub(crate) const MAX_BPM: u32 = 200;

/// One of the twelve chromatic keys, written with sharps.
///
/// Keys are stored in the configuration file by their display names, such as
/// `"F#"`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub(crate) enum MusicalKey {
    #[default]
    C,
    #[serde(rename = "C#")]
    CSharp,
    D,
    #[serde(rename = "D#")]
    DSharp,
    E,
    F,
    #[serde(rename = "F#")]
    FSharp,
    G,
    #[serde(rename = "G#")]
    GSharp,
    A,
    #[serde(rename = "A#")]
    ASharp,
    B,
}

impl MusicalKey {
    pub(crate) const ALL: [MusicalKey; 12] = [
        MusicalKey::C,
        MusicalKey::CSharp,
        MusicalKey::D,
        MusicalKey::DSharp,
        MusicalKey::E,
        MusicalKey::F,
        MusicalKey::FSharp,
        MusicalKey::G,
        MusicalKey::GSharp,
        MusicalKey::A,
        MusicalKey::ASharp,
        MusicalKey::B,
    ];

    /// The keys without accidentals.
    pub(crate) const NATURAL: [MusicalKey; 7] = [
        MusicalKey::C,
        MusicalKey::D,
        MusicalKey::E,
        MusicalKey::F,
        MusicalKey::G,
        MusicalKey::A,
        MusicalKey::B,
    ];

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            MusicalKey::C => "C",
            MusicalKey::CSharp => "C#",
            MusicalKey::D => "D",
            MusicalKey::DSharp => "D#",
            MusicalKey::E => "E",
            MusicalKey::F => "F",
            MusicalKey::FSharp => "F#",
            MusicalKey::G => "G",
            MusicalKey::GSharp => "G#",
            MusicalKey::A => "A",
            MusicalKey::ASharp => "A#",
            MusicalKey::B => "B",
        }
    }

    /// Steps one semitone up, wrapping from B back to C.
    pub(crate) fn next(self) -> Self {
        let idx = Self::index_of(self);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Steps one semitone down, wrapping from C back to B.
    pub(crate) fn previous(self) -> Self {
        let idx = Self::index_of(self);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index_of(key: MusicalKey) -> usize {
        Self::ALL.iter().position(|k| *k == key).unwrap_or(0)
    }
}

impl fmt::Display for MusicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The text given as a key is not one of the twelve key names.
#[derive(Debug, Error, PartialEq)]
#[error("unknown musical key: {0}")]
pub(crate) struct ParseKeyError(pub(crate) String);

impl FromStr for MusicalKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        MusicalKey::ALL
            .iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| ParseKeyError(wanted.to_string()))
    }
}

/// A sound produced by a search, as displayed in the results view.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SearchResult {
    pub(crate) id: SoundId,
    pub(crate) name: String,
    pub(crate) bpm: u32,
    pub(crate) key: MusicalKey,
    pub(crate) duration_secs: f64,
}

/// A sound previously saved to the library.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LibrarySound {
    pub(crate) id: SoundId,
    pub(crate) name: String,
    pub(crate) query: String,
    pub(crate) bpm: u32,
    pub(crate) key: MusicalKey,
    pub(crate) duration_secs: u32,
    pub(crate) date: String,
    pub(crate) liked: bool,
}

/// What the user asked for: the query and the search options at the time.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SearchRequest {
    pub(crate) query: String,
    pub(crate) bpm: u32,
    pub(crate) key: MusicalKey,
}

impl SearchRequest {
    pub(crate) fn new(query: impl Into<String>, bpm: u32, key: MusicalKey) -> Self {
        Self {
            query: query.into(),
            bpm,
            key,
        }
    }
}
