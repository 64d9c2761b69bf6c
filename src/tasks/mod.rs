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

//! Background search processing.
//!
//! Searches run on a dedicated worker thread so that a slow search, or the
//! deliberate pause before a retry, never holds up the UI. The worker turns
//! [`AppTask`] requests into results and broadcasts them back to the
//! application via [`AppEvent`]s, tagged with the id of the request they
//! answer.

mod handlers;

use anyhow::Result;
use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
};
use tracing::warn;

use crate::{
    config::AppConfig,
    events::AppEvent,
    model::{SearchRequest, search::RequestId},
};

/// Work for the background worker, tagged with the id of the request it
/// answers.
#[derive(Debug)]
pub(crate) enum AppTask {
    Search(RequestId, SearchRequest),
    /// As `Search`, after the configured retry delay.
    RetrySearch(RequestId, SearchRequest),
}

/// Spawns a background thread to process application tasks.
///
/// # Arguments
///
/// * `config` - The application configuration.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_task_worker(
    config: &AppConfig,
    task_rx: Receiver<AppTask>,
    event_tx: Sender<AppEvent>,
) {
    let config = config.clone();

    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            let ctx = TaskContext {
                config: &config,
                event_tx: &event_tx,
            };

            if let Err(e) = handle_task(task, &ctx) {
                warn!(error = %e, "task failed");
                let _ = event_tx.send(AppEvent::Error(e.to_string()));
            }
        }
    });
}

/// Shared resources required by task handlers.
struct TaskContext<'a> {
    config: &'a AppConfig,
    event_tx: &'a Sender<AppEvent>,
}

fn handle_task(task: AppTask, ctx: &TaskContext) -> Result<()> {
    match task {
        AppTask::Search(id, request) => handlers::search(ctx, id, request),
        AppTask::RetrySearch(id, request) => handlers::retry_search(ctx, id, request),
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::mpsc, time::Duration};

    use super::*;
    use crate::model::MusicalKey;

    fn worker(retry_delay_ms: u64) -> (Sender<AppTask>, Receiver<AppEvent>) {
        let mut config = AppConfig::default();
        config.search.retry_delay_ms = retry_delay_ms;

        let (task_tx, task_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        spawn_task_worker(&config, task_rx, event_tx);

        (task_tx, event_rx)
    }

    #[test]
    fn search_answers_with_its_request_id() {
        let (task_tx, event_rx) = worker(0);
        let request = SearchRequest::new("rain", 107, MusicalKey::C);
        task_tx.send(AppTask::Search(7, request)).unwrap();

        match event_rx.recv_timeout(Duration::from_secs(2)).unwrap() {
            AppEvent::SearchResultsReady(id, results) => {
                assert_eq!(id, 7);
                assert_eq!(results.len(), 3);
                assert_eq!(results[0].name, "rain Melody");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn retry_waits_before_answering() {
        let (task_tx, event_rx) = worker(100);
        let request = SearchRequest::new("rain", 107, MusicalKey::C);
        task_tx.send(AppTask::RetrySearch(2, request)).unwrap();

        assert!(event_rx.recv_timeout(Duration::from_millis(20)).is_err());
        assert!(matches!(
            event_rx.recv_timeout(Duration::from_secs(2)).unwrap(),
            AppEvent::SearchResultsReady(2, _)
        ));
    }

    #[test]
    fn blank_query_reports_an_error() {
        let (task_tx, event_rx) = worker(0);
        let request = SearchRequest::new("   ", 107, MusicalKey::C);
        task_tx.send(AppTask::Search(1, request)).unwrap();

        assert!(matches!(
            event_rx.recv_timeout(Duration::from_secs(2)).unwrap(),
            AppEvent::Error(_)
        ));
    }
}
