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

//! Sound search state.
//!
//! This module provides state for the search view: the options the user has
//! chosen, the results of the most recent search and which of those results
//! the user has liked.

use std::collections::HashSet;

use crate::model::{MAX_BPM, MIN_BPM, MusicalKey, SearchRequest, SearchResult, SoundId};

/// Identifies one submitted search, so that late results can be recognised.
pub(crate) type RequestId = u64;

/// State of the search view that outlives any one request.
pub(crate) struct Search {
    pub(crate) query: String,
    pub(crate) bpm: u32,
    pub(crate) key: MusicalKey,
    pub(crate) show_options: bool,

    results: Vec<SearchResult>,
    show_results: bool,
    liked: HashSet<SoundId>,
    latest_request: RequestId,
}

impl Search {
    /// Create an empty search with the given default options.
    ///
    /// # Arguments
    ///
    /// * `bpm` - The initial tempo option, clamped to the supported range.
    /// * `key` - The initial key option.
    pub(crate) fn new(bpm: u32, key: MusicalKey) -> Self {
        Self {
            query: String::new(),
            bpm: bpm.clamp(MIN_BPM, MAX_BPM),
            key,
            show_options: false,
            results: vec![],
            show_results: false,
            liked: HashSet::new(),
            latest_request: 0,
        }
    }

    /// Builds a request for `query` using the current search options.
    ///
    /// Surrounding whitespace is trimmed from the query; a blank query is
    /// still returned and is rejected later on submission.
    pub(crate) fn request(&self, query: &str) -> SearchRequest {
        SearchRequest::new(query.trim(), self.bpm, self.key)
    }

    /// Records a newly submitted request and returns its id.
    ///
    /// Any request still outstanding is superseded; its results will be
    /// refused by [`Search::accept_results`].
    pub(crate) fn begin_request(&mut self, request: &SearchRequest) -> RequestId {
        self.query = request.query.clone();
        self.latest_request += 1;
        self.latest_request
    }

    /// Installs the results of request `request_id`, returning `false` if a
    /// newer request has been submitted since.
    pub(crate) fn accept_results(&mut self, request_id: RequestId, results: Vec<SearchResult>) -> bool {
        if request_id != self.latest_request {
            return false;
        }

        self.results = results;
        self.show_results = true;
        true
    }

    /// Hides the results until those of the next request are accepted.
    pub(crate) fn hide_results(&mut self) {
        self.show_results = false;
    }

    /// The results on show, empty while they are hidden.
    pub(crate) fn results(&self) -> &[SearchResult] {
        if self.show_results { &self.results } else { &[] }
    }

    pub(crate) fn showing_results(&self) -> bool {
        self.show_results
    }

    pub(crate) fn toggle_like(&mut self, id: SoundId) {
        if !self.liked.insert(id) {
            self.liked.remove(&id);
        }
    }

    pub(crate) fn is_liked(&self, id: SoundId) -> bool {
        self.liked.contains(&id)
    }

    pub(crate) fn toggle_options(&mut self) {
        self.show_options = !self.show_options;
    }

    /// Moves the tempo option by `delta`, clamped to the supported range.
    pub(crate) fn adjust_bpm(&mut self, delta: i32) {
        let bpm = self.bpm as i64 + delta as i64;
        self.bpm = bpm.clamp(MIN_BPM as i64, MAX_BPM as i64) as u32;
    }

    pub(crate) fn set_bpm(&mut self, bpm: u32) {
        self.bpm = bpm.clamp(MIN_BPM, MAX_BPM);
    }

    pub(crate) fn cycle_key(&mut self, forward: bool) {
        self.key = if forward { self.key.next() } else { self.key.previous() };
    }
}
