// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building Egress Aggregator
//!
//! Sums storey occupant loads into the building total and re-checks the
//! discharge level against it. When no storey is flagged as the discharge
//! level the discharge check is skipped silently; the report records that
//! it did not run.

use crate::storeys::{apply_storey_egress, report_storey};
use egress_model::{CheckState, EvaluationReport, Snapshot, NOT_APPLICABLE};
use log::debug;

/// Aggregate the building level
pub fn aggregate_building(snapshot: &mut Snapshot, report: &mut EvaluationReport) {
    snapshot.building.occupant_load = snapshot.storeys.iter().map(|s| s.occupant_load).sum();
    report.building_occupant_load = snapshot.building.occupant_load;

    // The occupancy group only permits the layout with sprinklers present
    snapshot.building.sprinklers_required_not_provided = !snapshot.building.sprinkler_protection
        && snapshot.building.travel_distance_limit_overall == NOT_APPLICABLE;

    let discharge = snapshot
        .storeys
        .iter()
        .position(|s| s.is_discharge_level);
    let Some(i) = discharge else {
        debug!("no discharge level flagged; building-level egress not evaluated");
        report.building_level = CheckState::NotEvaluated;
        return;
    };

    let id = snapshot.storeys[i].id;
    let widths: Vec<f64> = snapshot.discharge_doors_on(id).map(|d| d.width).collect();
    let occupant_load = snapshot.building.occupant_load;
    let capacity = snapshot.building.egress_capacity_per_occupant;

    // The discharge level must pass its exits with the whole building's
    // load, not just its own; its storey-level result is overwritten
    let storey = &mut snapshot.storeys[i];
    apply_storey_egress(storey, occupant_load, capacity, &widths);
    storey.occupant_load = occupant_load;

    report_storey(storey, report);
    report.building_level = CheckState::from_bool(
        storey.has_sufficient_exit_count
            && storey.has_sufficient_egress_width
            && storey.has_balanced_egress_width,
    );
}
