// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The staged evaluation pass
//!
//! Stage order is fixed: validate, building defaults, room functions,
//! rooms, storeys, building. Each stage completes before the next begins.

use crate::building::aggregate_building;
use crate::defaults::resolve_building_defaults;
use crate::functions::resolve_room_functions;
use crate::rooms::{evaluate_rooms, flag_door_sizes};
use crate::storeys::aggregate_storeys;
use egress_model::{CodeTables, EvaluationReport, Result, Snapshot};
use log::debug;

/// Run one full evaluation pass
///
/// Works on a copy of the snapshot and swaps it in only on success, so a
/// failed pass leaves the caller's snapshot untouched.
pub(crate) fn run_pass(
    tables: &CodeTables,
    snapshot: &mut Snapshot,
    on_progress: &dyn Fn(&str, f32),
) -> Result<EvaluationReport> {
    let mut working = snapshot.clone();
    let mut report = EvaluationReport::default();

    on_progress("Validating snapshot", 0.0);
    working.validate()?;
    debug!(
        "evaluating {} rooms, {} doors, {} storeys",
        working.rooms.len(),
        working.doors.len(),
        working.storeys.len()
    );

    on_progress("Resolving building defaults", 15.0);
    report.fallback_lookups += resolve_building_defaults(&mut working.building, tables)?;

    on_progress("Resolving room functions", 30.0);
    report.fallback_lookups += resolve_room_functions(&mut working.rooms, tables)?;

    on_progress("Evaluating rooms", 50.0);
    flag_door_sizes(&mut working, &mut report);
    evaluate_rooms(&mut working, &mut report);

    on_progress("Aggregating storeys", 75.0);
    aggregate_storeys(&mut working, &mut report);

    on_progress("Aggregating building", 90.0);
    aggregate_building(&mut working, &mut report);

    on_progress("Complete", 100.0);
    *snapshot = working;
    Ok(report)
}
