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

//! Mock sound data.
//!
//! There is no real sound index behind the application; searches fabricate a
//! small result set derived from the query and the library is a fixed set of
//! demo sounds.

use rand::{Rng, rng, seq::{IndexedRandom, IteratorRandom}};
use thiserror::Error;

use crate::model::{LibrarySound, MusicalKey, SearchRequest, SearchResult};

const RESULT_VARIANTS: [(&str, f64); 3] = [("Melody", 43.0), ("Rhythm", 52.0), ("Ambient", 65.0)];

const RESULT_BPM_MIN: u32 = 80;
const RESULT_BPM_MAX: u32 = 120;

#[derive(Debug, Error, PartialEq)]
pub(crate) enum SearchError {
    #[error("search query is empty")]
    EmptyQuery,
}

/// Fabricates the results for a search request.
///
/// Each request yields one result per variant, named after the trimmed query,
/// with a random tempo and a random natural key. The tempo and key options of
/// the request do not influence the results.
///
/// # Errors
///
/// Returns [`SearchError::EmptyQuery`] if the query is blank.
pub(crate) fn generate_results(request: &SearchRequest) -> Result<Vec<SearchResult>, SearchError> {
    generate_results_with(request, &mut rng())
}

pub(crate) fn generate_results_with<R: Rng + ?Sized>(
    request: &SearchRequest,
    rng: &mut R,
) -> Result<Vec<SearchResult>, SearchError> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    let results = RESULT_VARIANTS
        .iter()
        .zip(1..)
        .map(|(&(variant, duration_secs), id)| SearchResult {
            id,
            name: format!("{} {}", query, variant),
            bpm: (RESULT_BPM_MIN..RESULT_BPM_MAX)
                .choose(rng)
                .unwrap_or(RESULT_BPM_MIN),
            key: MusicalKey::NATURAL.choose(rng).copied().unwrap_or_default(),
            duration_secs,
        })
        .collect();

    Ok(results)
}

/// The demo library shown in the library view.
pub(crate) fn library_sounds() -> Vec<LibrarySound> {
    let sound = |id, name: &str, query: &str, bpm, key, duration_secs, date: &str, liked| LibrarySound {
        id,
        name: name.to_string(),
        query: query.to_string(),
        bpm,
        key,
        duration_secs,
        date: date.to_string(),
        liked,
    };

    vec![
        sound(1, "Melancholic Piano Loop", "sad piano with reverb", 85, MusicalKey::C, 32, "2025-04-08", true),
        sound(2, "Underwater Heartbeat", "underwater heartbeat rhythm", 72, MusicalKey::F, 45, "2025-04-07", false),
        sound(3, "Emotional Strings", "emotional string section", 90, MusicalKey::G, 72, "2025-04-06", true),
        sound(4, "Distant Memories", "atmospheric piano memories", 80, MusicalKey::D, 58, "2025-04-05", false),
        sound(5, "Gentle Waves", "gentle ocean waves ambient", 75, MusicalKey::A, 65, "2025-04-04", false),
        sound(6, "Urban Night", "urban night city sounds", 95, MusicalKey::E, 82, "2025-04-03", true),
        sound(7, "Forest Ambience", "forest nature sounds birds", 60, MusicalKey::B, 135, "2025-04-02", false),
        sound(8, "Retro Synth Wave", "80s retro synth wave", 120, MusicalKey::FSharp, 105, "2025-04-01", true),
    ]
}
