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

use std::{thread, time::Duration};

use anyhow::Result;
use tracing::debug;

use crate::{
    events::AppEvent,
    model::{SearchRequest, mock, search::RequestId},
    tasks::TaskContext,
};

/// Generates results for `request` and hands them back tagged with `id`.
///
/// # Errors
///
/// Returns an error if the query is blank or the application has gone away.
pub(super) fn search(ctx: &TaskContext, id: RequestId, request: SearchRequest) -> Result<()> {
    let results = mock::generate_results(&request)?;
    debug!(id, results = results.len(), "search complete");
    ctx.event_tx.send(AppEvent::SearchResultsReady(id, results))?;

    Ok(())
}

/// Waits for the configured retry delay, then searches as [`search`] does.
pub(super) fn retry_search(ctx: &TaskContext, id: RequestId, request: SearchRequest) -> Result<()> {
    thread::sleep(Duration::from_millis(ctx.config.search.retry_delay_ms));
    search(ctx, id, request)
}
