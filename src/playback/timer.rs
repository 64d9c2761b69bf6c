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

//! Periodic tick sources for simulated playback.
//!
//! A timer never touches playback state itself. It only delivers
//! [`AppEvent::PlaybackTick`] events carrying the [`Generation`] it was
//! started with, and the controller decides on the main thread whether that
//! generation is still live.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::Sender,
    },
    thread,
    time::Duration,
};

use tracing::trace;

use crate::events::AppEvent;

/// Identifies one started timer. Every start takes a new, larger value.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct Generation(u64);

impl Generation {
    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// A handle to a running timer.
///
/// Cancelling must be idempotent; a cancelled timer may still have ticks in
/// flight, which the controller discards by generation.
pub(crate) trait TickTimer {
    fn cancel(&mut self);
}

/// Starts periodic timers.
pub(crate) trait TickScheduler {
    type Timer: TickTimer;

    fn start(&mut self, generation: Generation, interval: Duration) -> Self::Timer;
}

/// Schedules ticks on a background thread per timer, delivered through the
/// application event channel.
pub(crate) struct ThreadTickScheduler {
    event_tx: Sender<AppEvent>,
}

impl ThreadTickScheduler {
    pub(crate) fn new(event_tx: Sender<AppEvent>) -> Self {
        Self { event_tx }
    }
}

impl TickScheduler for ThreadTickScheduler {
    type Timer = ThreadTimer;

    fn start(&mut self, generation: Generation, interval: Duration) -> ThreadTimer {
        let cancelled = Arc::new(AtomicBool::new(false));

        let thread_cancelled = Arc::clone(&cancelled);
        let event_tx = self.event_tx.clone();

        thread::spawn(move || {
            loop {
                thread::sleep(interval);
                if thread_cancelled.load(Ordering::Acquire) {
                    break;
                }
                // The receiver is gone once the application is shutting down
                if event_tx.send(AppEvent::PlaybackTick(generation)).is_err() {
                    break;
                }
            }
            trace!(?generation, "playback timer stopped");
        });

        ThreadTimer { cancelled }
    }
}

pub(crate) struct ThreadTimer {
    cancelled: Arc<AtomicBool>,
}

impl TickTimer for ThreadTimer {
    fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

impl Drop for ThreadTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn generations_increase() {
        let first = Generation::default();
        assert!(first.next() > first);
        assert_eq!(first.next().next(), Generation(2));
    }

    #[test]
    fn thread_timer_delivers_its_generation_until_cancelled() {
        let (event_tx, event_rx) = mpsc::channel();
        let mut scheduler = ThreadTickScheduler::new(event_tx);

        let generation = Generation::default().next();
        let mut timer = scheduler.start(generation, Duration::from_millis(5));

        let event = event_rx
            .recv_timeout(Duration::from_secs(2))
            .expect("timer should tick");
        assert!(matches!(event, AppEvent::PlaybackTick(g) if g == generation));

        timer.cancel();
        timer.cancel();

        // Drain anything sent before the thread observed the cancellation
        thread::sleep(Duration::from_millis(50));
        while event_rx.try_recv().is_ok() {}

        assert!(event_rx.recv_timeout(Duration::from_millis(50)).is_err());
    }
}
