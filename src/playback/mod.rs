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

//! Simulated playback of search results.
//!
//! This module provides the [`PlaybackController`] used by the search view.
//! There is no audio: playing a track starts a periodic timer, and each tick
//! advances the track's position by a fixed step until it reaches the end,
//! where it rewinds to the start and stops.
//!
//! # Timers
//!
//! At most one timer is live at any time. Each timer is started with a fresh
//! [`Generation`]; [`PlaybackController::tick`] ignores any tick whose
//! generation is not the live one, so cancelling a timer takes effect as soon
//! as the cancelling call returns, even if the timer thread has already queued
//! further ticks.

mod state;
pub(crate) mod timer;

use std::{collections::HashMap, time::Duration};

use tracing::debug;

pub(crate) use state::PlaybackSnapshot;
use state::PlaybackState;
pub(crate) use timer::{Generation, ThreadTickScheduler, TickScheduler, TickTimer};

use crate::{config::PlaybackConfig, model::SoundId};

const END_PERCENT: f64 = 100.0;

/// Tick cadence of the simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PlaybackSettings {
    pub(crate) tick_interval: Duration,
    pub(crate) step_percent: f64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(100),
            step_percent: 0.5,
        }
    }
}

impl From<&PlaybackConfig> for PlaybackSettings {
    fn from(config: &PlaybackConfig) -> Self {
        Self {
            tick_interval: Duration::from_millis(config.tick_interval_ms),
            step_percent: config.step_percent,
        }
    }
}

/// Owns the per-track positions and the single live timer.
///
/// The scheduler `S` decides how ticks are delivered: on a background thread
/// in the application, or by hand in tests.
pub(crate) struct PlaybackController<S: TickScheduler> {
    scheduler: S,
    settings: PlaybackSettings,
    durations: HashMap<SoundId, f64>,
    state: PlaybackState,
    generation: Generation,
    timer: Option<S::Timer>,
}

impl<S: TickScheduler> PlaybackController<S> {
    /// Create a controller with no known tracks.
    ///
    /// # Arguments
    ///
    /// * `scheduler` - Starts the tick timers.
    /// * `settings` - Tick interval and step of the simulation.
    pub(crate) fn new(scheduler: S, settings: PlaybackSettings) -> Self {
        Self {
            scheduler,
            settings,
            durations: HashMap::new(),
            state: PlaybackState::default(),
            generation: Generation::default(),
            timer: None,
        }
    }

    /// Starts playing `id`, or pauses it if it is already playing.
    ///
    /// Any other playing track is paused first and keeps its position. Does
    /// nothing for an unknown track or one without a positive duration.
    pub(crate) fn play(&mut self, id: SoundId) {
        if self.playable_duration(id).is_none() {
            debug!(id, "ignoring play for unknown track");
            return;
        }

        if self.state.is_active(id) {
            self.stop();
            return;
        }

        self.cancel_timer();
        self.state.active = Some(id);
        self.state.positions.touch(id);
        self.state.times.touch(id);
        self.start_timer();

        debug!(id, position = self.state.position(id), "playing");
    }

    /// Pauses the active track, keeping its position.
    pub(crate) fn stop(&mut self) {
        self.cancel_timer();
        if let Some(id) = self.state.active.take() {
            debug!(id, position = self.state.position(id), "paused");
        }
    }

    /// Moves `id` to `percent` of its duration, clamped to `0..=100`.
    ///
    /// A NaN `percent` is treated as `0`. Unknown tracks and tracks without a
    /// positive duration are ignored and gain no entry.
    ///
    /// Seeking the active track restarts its timer from the new position;
    /// seeking any other track only moves it.
    ///
    /// # Arguments
    ///
    /// * `id` - The track to move.
    /// * `percent` - The new position as a percentage of the track duration.
    pub(crate) fn seek_to(&mut self, id: SoundId, percent: f64) {
        let Some(duration) = self.playable_duration(id) else {
            debug!(id, "ignoring seek for unknown track");
            return;
        };

        let position = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, END_PERCENT)
        };
        self.set_position(id, position, duration);

        if self.state.is_active(id) {
            self.cancel_timer();
            self.start_timer();
        }

        debug!(id, position, "seeked");
    }

    /// Moves `id` relative to its current position, with the same clamping as
    /// [`PlaybackController::seek_to`].
    pub(crate) fn seek_by(&mut self, id: SoundId, delta_percent: f64) {
        let position = self.state.position(id);
        self.seek_to(id, position + delta_percent);
    }

    /// Discards all per-track state and adopts `tracks` as the known tracks.
    pub(crate) fn reset(&mut self, tracks: impl IntoIterator<Item = (SoundId, f64)>) {
        self.cancel_timer();
        self.state.active = None;
        self.state.positions.clear();
        self.state.times.clear();
        self.durations = tracks.into_iter().collect();

        debug!(tracks = self.durations.len(), "playback reset");
    }

    /// Cancels any outstanding timer. Also runs when the controller is
    /// dropped.
    pub(crate) fn dispose(&mut self) {
        self.cancel_timer();
        self.state.active = None;
    }

    /// Applies one tick from the timer started as `generation`.
    ///
    /// Returns `true` if the state changed; ticks from cancelled or replaced
    /// timers change nothing.
    pub(crate) fn tick(&mut self, generation: Generation) -> bool {
        if self.timer.is_none() || generation != self.generation {
            return false;
        }

        let Some(id) = self.state.active else {
            return false;
        };
        let Some(duration) = self.durations.get(&id).copied() else {
            return false;
        };

        let position = self.state.position(id) + self.settings.step_percent;
        if position >= END_PERCENT {
            self.cancel_timer();
            self.state.active = None;
            self.set_position(id, 0.0, duration);
            debug!(id, "finished");
        } else {
            self.set_position(id, position, duration);
        }

        true
    }

    /// The track currently playing, if any.
    pub(crate) fn active(&self) -> Option<SoundId> {
        self.state.active
    }

    /// Position of `id` as a percentage, `0` for a track never played or
    /// seeked.
    pub(crate) fn position(&self, id: SoundId) -> f64 {
        self.state.position(id)
    }

    /// Elapsed seconds of `id`, derived from its position.
    pub(crate) fn current_time(&self, id: SoundId) -> f64 {
        self.state.current_time(id)
    }

    /// Copy of the current state for drawing one frame.
    pub(crate) fn snapshot(&self) -> PlaybackSnapshot {
        self.state.clone()
    }

    fn playable_duration(&self, id: SoundId) -> Option<f64> {
        self.durations.get(&id).copied().filter(|d| *d > 0.0)
    }

    fn set_position(&mut self, id: SoundId, position: f64, duration: f64) {
        self.state.positions.set(id, position);
        self.state.times.set(id, position / END_PERCENT * duration);
    }

    fn start_timer(&mut self) {
        self.generation = self.generation.next();
        let timer = self
            .scheduler
            .start(self.generation, self.settings.tick_interval);
        self.timer = Some(timer);
    }

    fn cancel_timer(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
    }
}

impl<S: TickScheduler> Drop for PlaybackController<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    /// Records started timers; ticks are delivered by calling
    /// [`PlaybackController::tick`] directly.
    #[derive(Clone, Default)]
    struct ManualScheduler {
        timers: Rc<RefCell<Vec<(Generation, Rc<RefCell<bool>>)>>>,
    }

    impl ManualScheduler {
        fn live(&self) -> Vec<Generation> {
            self.timers
                .borrow()
                .iter()
                .filter(|(_, cancelled)| !*cancelled.borrow())
                .map(|(generation, _)| *generation)
                .collect()
        }

        fn started(&self) -> usize {
            self.timers.borrow().len()
        }
    }

    struct ManualTimer {
        cancelled: Rc<RefCell<bool>>,
    }

    impl TickTimer for ManualTimer {
        fn cancel(&mut self) {
            *self.cancelled.borrow_mut() = true;
        }
    }

    impl TickScheduler for ManualScheduler {
        type Timer = ManualTimer;

        fn start(&mut self, generation: Generation, _interval: Duration) -> ManualTimer {
            let cancelled = Rc::new(RefCell::new(false));
            self.timers
                .borrow_mut()
                .push((generation, Rc::clone(&cancelled)));
            ManualTimer { cancelled }
        }
    }

    const A: SoundId = 1;
    const B: SoundId = 2;
    const C: SoundId = 3;
    const D: SoundId = 4;

    const NO_TRACKS: [(SoundId, f64); 0] = [];

    fn controller(tracks: &[(SoundId, f64)]) -> (PlaybackController<ManualScheduler>, ManualScheduler) {
        let scheduler = ManualScheduler::default();
        let mut controller = PlaybackController::new(scheduler.clone(), PlaybackSettings::default());
        controller.reset(tracks.iter().copied());
        (controller, scheduler)
    }

    /// Delivers one tick from the live timer, as the event loop would.
    fn tick(controller: &mut PlaybackController<ManualScheduler>, scheduler: &ManualScheduler) -> bool {
        match scheduler.live().last() {
            Some(generation) => controller.tick(*generation),
            None => false,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn playing_advances_until_the_end_then_rewinds() {
        let (mut controller, scheduler) = controller(&[(A, 43.0)]);
        controller.play(A);

        let mut last = controller.position(A);
        let mut ticks = 0;
        while controller.active() == Some(A) {
            assert!(tick(&mut controller, &scheduler));
            ticks += 1;

            if controller.active().is_some() {
                let position = controller.position(A);
                assert!(position >= last);
                assert!(position < 100.0);
                assert_close(controller.current_time(A), position / 100.0 * 43.0);
                last = position;
            }
        }

        // 0.5 per tick reaches 100 on the 200th tick
        assert_eq!(ticks, 200);
        assert_eq!(controller.position(A), 0.0);
        assert_eq!(controller.current_time(A), 0.0);
        assert_eq!(controller.active(), None);
        assert!(scheduler.live().is_empty());
    }

    #[test]
    fn seek_clamps_out_of_range_positions() {
        let (mut controller, _) = controller(&[(A, 40.0)]);

        for (requested, expected) in [(-25.0, 0.0), (150.0, 100.0), (f64::INFINITY, 100.0), (f64::NEG_INFINITY, 0.0)] {
            controller.seek_to(A, requested);
            assert_eq!(controller.position(A), expected);
            assert_close(controller.current_time(A), expected / 100.0 * 40.0);
        }

        controller.seek_to(A, f64::NAN);
        assert_eq!(controller.position(A), 0.0);
    }

    #[test]
    fn seek_half_way_gives_half_the_duration() {
        let (mut controller, scheduler) = controller(&[(A, 65.0)]);
        controller.seek_to(A, 50.0);

        assert_close(controller.current_time(A), 32.5);
        assert_close(controller.snapshot().display_time(A, 65.0, true), 32.5);
        assert_eq!(scheduler.started(), 0);
    }

    #[test]
    fn reset_twice_matches_reset_once() {
        let (mut controller, _) = controller(&[(A, 40.0), (B, 20.0)]);
        controller.play(A);
        controller.seek_to(B, 30.0);

        controller.reset(NO_TRACKS);
        let once = controller.snapshot();
        controller.reset(NO_TRACKS);
        let twice = controller.snapshot();

        assert_eq!(once, twice);
        assert_eq!(twice.active, None);
        assert!(twice.positions.is_empty());
        assert!(twice.times.is_empty());
    }

    #[test]
    fn only_the_most_recently_played_track_has_a_live_timer() {
        let (mut controller, scheduler) = controller(&[(A, 40.0), (B, 52.0), (C, 65.0)]);

        controller.play(A);
        for _ in 0..4 {
            tick(&mut controller, &scheduler);
        }
        controller.play(B);
        for _ in 0..6 {
            tick(&mut controller, &scheduler);
        }
        controller.play(C);

        assert_eq!(controller.active(), Some(C));
        assert_eq!(scheduler.live().len(), 1);
        assert_eq!(scheduler.started(), 3);
        assert_close(controller.position(A), 2.0);
        assert_close(controller.position(B), 3.0);
        assert_eq!(controller.position(C), 0.0);
    }

    #[test]
    fn scenario_play_seek_and_pause_a_single_track() {
        let (mut controller, scheduler) = controller(&[(A, 40.0)]);

        controller.play(A);
        for _ in 0..10 {
            tick(&mut controller, &scheduler);
        }
        assert_close(controller.position(A), 5.0);
        assert_close(controller.current_time(A), 5.0 / 100.0 * 40.0);

        let before_seek = scheduler.live();
        controller.seek_to(A, 0.0);
        assert_eq!(controller.position(A), 0.0);
        assert_eq!(controller.current_time(A), 0.0);
        assert_eq!(controller.active(), Some(A));

        // The seek replaced the timer rather than resuming the old one
        let after_seek = scheduler.live();
        assert_eq!(after_seek.len(), 1);
        assert_ne!(before_seek, after_seek);
        assert!(!controller.tick(before_seek[0]));

        tick(&mut controller, &scheduler);
        assert_close(controller.position(A), 0.5);

        controller.play(A);
        assert_eq!(controller.active(), None);
        assert_close(controller.position(A), 0.5);
        assert!(scheduler.live().is_empty());
    }

    #[test]
    fn scenario_switching_tracks_freezes_the_first() {
        let (mut controller, scheduler) = controller(&[(A, 40.0), (B, 52.0)]);

        controller.play(A);
        for _ in 0..3 {
            tick(&mut controller, &scheduler);
        }
        let stale = scheduler.live()[0];

        controller.play(B);
        for _ in 0..5 {
            tick(&mut controller, &scheduler);
        }

        // A tick queued by the first timer before it was cancelled is ignored
        assert!(!controller.tick(stale));

        assert_close(controller.position(A), 1.5);
        assert_close(controller.position(B), 2.5);
        assert_eq!(controller.active(), Some(B));
        assert_eq!(scheduler.live().len(), 1);
    }

    #[test]
    fn scenario_reset_discards_previous_tracks() {
        let (mut controller, scheduler) = controller(&[(A, 40.0), (B, 52.0)]);
        controller.play(A);
        tick(&mut controller, &scheduler);
        controller.seek_to(B, 70.0);

        controller.reset([(C, 43.0), (D, 65.0)]);

        let snapshot = controller.snapshot();
        assert!(!snapshot.positions.contains(A));
        assert!(!snapshot.positions.contains(B));
        assert!(!snapshot.times.contains(A));
        assert_eq!(snapshot.position(C), 0.0);
        assert_eq!(snapshot.current_time(D), 0.0);
        assert_eq!(controller.active(), None);
        assert!(scheduler.live().is_empty());

        // A no longer belongs to the result set
        controller.play(A);
        assert_eq!(controller.active(), None);
    }

    #[test]
    fn seeking_an_idle_track_does_not_start_a_timer() {
        let (mut controller, scheduler) = controller(&[(A, 40.0), (B, 52.0)]);
        controller.play(A);
        controller.seek_to(B, 25.0);

        assert_eq!(controller.active(), Some(A));
        assert_eq!(scheduler.started(), 1);
        assert_eq!(controller.position(B), 25.0);
    }

    #[test]
    fn seeking_to_the_end_while_playing_finishes_on_next_tick() {
        let (mut controller, scheduler) = controller(&[(A, 40.0)]);
        controller.play(A);
        controller.seek_to(A, 100.0);

        assert!(tick(&mut controller, &scheduler));
        assert_eq!(controller.position(A), 0.0);
        assert_eq!(controller.active(), None);
    }

    #[test]
    fn seek_by_is_relative_and_clamped() {
        let (mut controller, _) = controller(&[(A, 40.0)]);
        controller.seek_by(A, 5.0);
        controller.seek_by(A, 5.0);
        assert_eq!(controller.position(A), 10.0);

        controller.seek_by(A, -50.0);
        assert_eq!(controller.position(A), 0.0);
    }

    #[test]
    fn unknown_and_silent_tracks_are_ignored() {
        let (mut controller, scheduler) = controller(&[(A, 0.0)]);

        controller.play(A);
        controller.play(B);
        controller.seek_to(A, 50.0);
        controller.seek_to(B, 50.0);
        controller.seek_by(A, 10.0);

        assert_eq!(controller.active(), None);
        assert_eq!(scheduler.started(), 0);
        assert!(!controller.snapshot().positions.contains(A));
        assert!(!controller.snapshot().positions.contains(B));
        assert!(!controller.snapshot().times.contains(A));
    }

    #[test]
    fn stop_and_dispose_are_idempotent() {
        let (mut controller, scheduler) = controller(&[(A, 40.0)]);
        controller.stop();
        controller.play(A);
        let generation = scheduler.live()[0];

        controller.dispose();
        controller.dispose();
        controller.stop();

        assert_eq!(controller.active(), None);
        assert!(scheduler.live().is_empty());
        assert!(!controller.tick(generation));
    }

    #[test]
    fn dropping_the_controller_cancels_its_timer() {
        let (mut controller, scheduler) = controller(&[(A, 40.0)]);
        controller.play(A);
        assert_eq!(scheduler.live().len(), 1);

        drop(controller);
        assert!(scheduler.live().is_empty());
    }

    #[test]
    fn custom_cadence_is_respected() {
        let scheduler = ManualScheduler::default();
        let settings = PlaybackSettings {
            tick_interval: Duration::from_millis(250),
            step_percent: 2.0,
        };
        let mut controller = PlaybackController::new(scheduler.clone(), settings);
        controller.reset([(A, 30.0)]);

        controller.play(A);
        tick(&mut controller, &scheduler);
        assert_eq!(controller.position(A), 2.0);
        assert_close(controller.current_time(A), 0.6);
    }
}
