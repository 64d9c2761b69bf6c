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

//! Per-track playback state.

use std::collections::HashMap;

use crate::model::SoundId;

/// A per-track value that reads as zero until it is first written.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct TrackMap {
    values: HashMap<SoundId, f64>,
}

impl TrackMap {
    pub(crate) fn get(&self, id: SoundId) -> f64 {
        self.values.get(&id).copied().unwrap_or(0.0)
    }

    pub(crate) fn set(&mut self, id: SoundId, value: f64) {
        self.values.insert(id, value);
    }

    /// Creates a zero entry for `id` unless one already exists.
    pub(crate) fn touch(&mut self, id: SoundId) {
        self.values.entry(id).or_insert(0.0);
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, id: SoundId) -> bool {
        self.values.contains_key(&id)
    }

    pub(crate) fn clear(&mut self) {
        self.values.clear();
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The state owned by the playback controller.
///
/// `times` is derived from `positions` and the track durations; it is only
/// ever written together with the position it was computed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PlaybackState {
    pub(crate) active: Option<SoundId>,
    pub(crate) positions: TrackMap,
    pub(crate) times: TrackMap,
}

impl PlaybackState {
    pub(crate) fn is_active(&self, id: SoundId) -> bool {
        self.active == Some(id)
    }

    pub(crate) fn position(&self, id: SoundId) -> f64 {
        self.positions.get(id)
    }

    pub(crate) fn current_time(&self, id: SoundId) -> f64 {
        self.times.get(id)
    }

    /// Time label value for a track of `duration` seconds, counting down to
    /// zero as playback approaches the end or up from zero otherwise.
    pub(crate) fn display_time(&self, id: SoundId, duration: f64, countdown: bool) -> f64 {
        let current = self.current_time(id);
        if countdown {
            (duration - current).max(0.0)
        } else {
            current
        }
    }
}

/// A read-only copy of the playback state, taken once per frame.
pub(crate) type PlaybackSnapshot = PlaybackState;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_entries_read_as_zero() {
        let mut map = TrackMap::default();
        assert_eq!(map.get(7), 0.0);
        assert!(!map.contains(7));

        map.touch(7);
        assert!(map.contains(7));
        assert_eq!(map.get(7), 0.0);

        map.set(7, 12.5);
        map.touch(7);
        assert_eq!(map.get(7), 12.5);
    }

    #[test]
    fn display_time_counts_down_or_up() {
        let mut state = PlaybackState::default();
        state.times.set(1, 10.0);

        assert_eq!(state.display_time(1, 40.0, true), 30.0);
        assert_eq!(state.display_time(1, 40.0, false), 10.0);
        assert_eq!(state.display_time(2, 40.0, true), 40.0);
    }
}
