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

//! Sound library management.
//!
//! This module provides state for the library view: the saved sounds and the
//! client-side filters applied to them.

use crate::model::{LibrarySound, MAX_BPM, MIN_BPM, MusicalKey, SoundId};

/// An inclusive tempo range.
pub(crate) type BpmRange = (u32, u32);

/// The client-side filters applied to the library list.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LibraryFilter {
    pub(crate) text: String,
    pub(crate) bpm_range: BpmRange,
    pub(crate) key: Option<MusicalKey>,
    pub(crate) liked_only: bool,
}

impl LibraryFilter {
    pub(crate) fn new(default_bpm_range: BpmRange) -> Self {
        Self {
            text: String::new(),
            bpm_range: default_bpm_range,
            key: None,
            liked_only: false,
        }
    }

    /// Returns `true` if `sound` passes every filter.
    ///
    /// The text matches the name or the original query, ignoring case; the
    /// tempo range is inclusive at both ends.
    pub(crate) fn matches(&self, sound: &LibrarySound) -> bool {
        let text = self.text.to_lowercase();
        let matches_text = text.is_empty()
            || sound.name.to_lowercase().contains(&text)
            || sound.query.to_lowercase().contains(&text);

        let (min, max) = self.bpm_range;
        let matches_bpm = (min..=max).contains(&sound.bpm);

        let matches_key = self.key.is_none_or(|k| k == sound.key);

        let matches_liked = !self.liked_only || sound.liked;

        matches_text && matches_bpm && matches_key && matches_liked
    }
}

/// A filter that differs from its default, shown as a removable badge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum FilterBadge {
    Bpm(u32, u32),
    Key(MusicalKey),
    LikedOnly,
}

/// The user's saved sounds, the active filters and the sound marked as
/// playing.
pub(crate) struct Library {
    pub(crate) sounds: Vec<LibrarySound>,
    pub(crate) filter: LibraryFilter,
    pub(crate) playing: Option<SoundId>,
    default_bpm_range: BpmRange,
}

impl Library {
    /// Create a library with every filter at its default.
    ///
    /// # Arguments
    ///
    /// * `sounds` - The saved sounds, in display order.
    /// * `default_bpm_range` - The tempo range that counts as "no filter".
    pub(crate) fn new(sounds: Vec<LibrarySound>, default_bpm_range: BpmRange) -> Self {
        Self {
            sounds,
            filter: LibraryFilter::new(default_bpm_range),
            playing: None,
            default_bpm_range,
        }
    }

    /// The sounds that pass the current filters, in library order.
    pub(crate) fn filtered(&self) -> Vec<&LibrarySound> {
        self.sounds
            .iter()
            .filter(|sound| self.filter.matches(sound))
            .collect()
    }

    /// Badges for the filters that differ from their defaults, in the order
    /// they are shown: tempo, key, liked.
    ///
    /// The text filter has its own input box and never produces a badge.
    pub(crate) fn active_filters(&self) -> Vec<FilterBadge> {
        let mut badges = vec![];

        if self.filter.bpm_range != self.default_bpm_range {
            let (min, max) = self.filter.bpm_range;
            badges.push(FilterBadge::Bpm(min, max));
        }
        if let Some(key) = self.filter.key {
            badges.push(FilterBadge::Key(key));
        }
        if self.filter.liked_only {
            badges.push(FilterBadge::LikedOnly);
        }

        badges
    }

    /// Returns the filter behind `badge` to its default.
    pub(crate) fn clear_filter(&mut self, badge: FilterBadge) {
        match badge {
            FilterBadge::Bpm(..) => self.filter.bpm_range = self.default_bpm_range,
            FilterBadge::Key(_) => self.filter.key = None,
            FilterBadge::LikedOnly => self.filter.liked_only = false,
        }
    }

    /// Restores the tempo, key and liked filters. The search text is kept.
    pub(crate) fn reset_filters(&mut self) {
        self.filter.bpm_range = self.default_bpm_range;
        self.filter.key = None;
        self.filter.liked_only = false;
    }

    /// Moves the lower tempo bound, never past the upper one.
    pub(crate) fn adjust_bpm_min(&mut self, delta: i32) {
        let (min, max) = self.filter.bpm_range;
        let min = Self::offset_bpm(min, delta).min(max);
        self.filter.bpm_range = (min, max);
    }

    /// Moves the upper tempo bound, never below the lower one.
    pub(crate) fn adjust_bpm_max(&mut self, delta: i32) {
        let (min, max) = self.filter.bpm_range;
        let max = Self::offset_bpm(max, delta).max(min);
        self.filter.bpm_range = (min, max);
    }

    /// Cycles the key filter through "any" and then every key.
    pub(crate) fn cycle_key(&mut self) {
        self.filter.key = match self.filter.key {
            None => Some(MusicalKey::C),
            Some(MusicalKey::B) => None,
            Some(key) => Some(key.next()),
        };
    }

    pub(crate) fn toggle_liked_only(&mut self) {
        self.filter.liked_only = !self.filter.liked_only;
    }

    /// Likes or unlikes sound `id`. Unknown ids are ignored.
    pub(crate) fn toggle_like(&mut self, id: SoundId) {
        if let Some(sound) = self.sounds.iter_mut().find(|s| s.id == id) {
            sound.liked = !sound.liked;
        }
    }

    /// Removes sound `id` from the library, clearing the playing marker if it
    /// was on that sound.
    pub(crate) fn delete(&mut self, id: SoundId) {
        self.sounds.retain(|s| s.id != id);
        if self.playing == Some(id) {
            self.playing = None;
        }
    }

    /// Moves the playing marker to `id`, or removes it if `id` already has it.
    pub(crate) fn toggle_playing(&mut self, id: SoundId) {
        self.playing = if self.playing == Some(id) { None } else { Some(id) };
    }

    /// The message shown when no sound passes the filters.
    pub(crate) fn empty_message(&self) -> &'static str {
        if self.sounds.is_empty() {
            "Your library is empty. Start searching for sounds to add them to your library."
        } else {
            "Try adjusting your filters or search query to find what you're looking for."
        }
    }

    fn offset_bpm(bpm: u32, delta: i32) -> u32 {
        (bpm as i64 + delta as i64).clamp(MIN_BPM as i64, MAX_BPM as i64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mock;

    fn library() -> Library {
        Library::new(mock::library_sounds(), (60, 140))
    }

    fn names(library: &Library) -> Vec<&str> {
        library.filtered().iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn default_filter_shows_everything_in_range() {
        let library = library();
        assert_eq!(library.filtered().len(), 8);
        assert!(library.active_filters().is_empty());
    }

    #[test]
    fn text_matches_name_or_query_case_insensitively() {
        let mut library = library();
        library.filter.text = "PIANO".to_string();
        assert_eq!(names(&library), ["Melancholic Piano Loop", "Distant Memories"]);

        library.filter.text = "city".to_string();
        assert_eq!(names(&library), ["Urban Night"]);
    }

    #[test]
    fn bpm_range_is_inclusive() {
        let mut library = library();
        library.filter.bpm_range = (85, 95);
        assert_eq!(
            names(&library),
            ["Melancholic Piano Loop", "Emotional Strings", "Urban Night"]
        );
        assert_eq!(library.active_filters(), [FilterBadge::Bpm(85, 95)]);
    }

    #[test]
    fn key_and_liked_filters_combine() {
        let mut library = library();
        library.filter.key = Some(MusicalKey::FSharp);
        library.toggle_liked_only();
        assert_eq!(names(&library), ["Retro Synth Wave"]);
        assert_eq!(
            library.active_filters(),
            [FilterBadge::Key(MusicalKey::FSharp), FilterBadge::LikedOnly]
        );

        library.clear_filter(FilterBadge::Key(MusicalKey::FSharp));
        assert_eq!(library.filtered().len(), 4);
    }

    #[test]
    fn reset_restores_defaults_but_keeps_text() {
        let mut library = library();
        library.filter.text = "wave".to_string();
        library.adjust_bpm_min(20);
        library.cycle_key();
        library.toggle_liked_only();

        library.reset_filters();
        assert!(library.active_filters().is_empty());
        assert_eq!(library.filter.text, "wave");
    }

    #[test]
    fn bpm_bounds_never_cross() {
        let mut library = library();
        library.adjust_bpm_min(500);
        assert_eq!(library.filter.bpm_range, (140, 140));
        library.adjust_bpm_max(-500);
        assert_eq!(library.filter.bpm_range, (140, 140));
        library.adjust_bpm_max(500);
        assert_eq!(library.filter.bpm_range, (140, MAX_BPM));
    }

    #[test]
    fn key_filter_cycles_back_to_any() {
        let mut library = library();
        for _ in 0..MusicalKey::ALL.len() {
            library.cycle_key();
            assert!(library.filter.key.is_some());
        }
        library.cycle_key();
        assert_eq!(library.filter.key, None);
    }

    #[test]
    fn deleting_the_playing_sound_stops_it() {
        let mut library = library();
        library.toggle_playing(3);
        assert_eq!(library.playing, Some(3));

        library.delete(3);
        assert_eq!(library.playing, None);
        assert_eq!(library.sounds.len(), 7);
    }

    #[test]
    fn empty_message_depends_on_whether_anything_is_saved() {
        let mut library = library();
        library.filter.text = "nothing matches this".to_string();
        assert!(library.filtered().is_empty());
        assert!(library.empty_message().starts_with("Try adjusting"));

        let ids: Vec<SoundId> = library.sounds.iter().map(|s| s.id).collect();
        for id in ids {
            library.delete(id);
        }
        assert!(library.empty_message().starts_with("Your library is empty"));
    }
}
