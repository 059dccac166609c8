// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room Egress Evaluator
//!
//! Flags exit doors against the minimum clear size, then derives every
//! room-level egress quantity: required width and exit count, available
//! width and count from the assigned doors, and the sufficiency, balance,
//! occupant-limit, and travel-distance checks.

use egress_model::{
    BuildingInfo, ElementId, ElementKind, EgressCheck, EvaluationReport, Snapshot,
};
use rustc_hash::FxHashMap;

/// Minimum clear width for an exit door, mm
pub const MIN_EXIT_DOOR_WIDTH: f64 = 812.99;
/// Minimum clear height for an exit door, mm
pub const MIN_EXIT_DOOR_HEIGHT: f64 = 2032.0;

/// Occupant load at which four exits are required
pub const FOUR_EXIT_OCCUPANT_LOAD: u32 = 1000;
/// Occupant load at which three exits are required
pub const THREE_EXIT_OCCUPANT_LOAD: u32 = 500;
/// Occupant load separating the two single-exit travel-distance limits
pub const LOW_OCCUPANCY_LOAD: u32 = 30;
/// Largest share of the available width one exit may carry
pub const BALANCE_SHARE: f64 = 0.5;

/// Count doors and sum their widths
pub(crate) fn door_availability(widths: &[f64]) -> (u32, f64) {
    (widths.len() as u32, widths.iter().sum())
}

/// Balance check: losing any one exit must not remove more than half the
/// available width
///
/// Trivially true for a single exit. The first oversized door decides.
pub(crate) fn has_balanced_width(widths: &[f64]) -> bool {
    if widths.len() <= 1 {
        return true;
    }
    let total: f64 = widths.iter().sum();
    !widths.iter().any(|w| *w > BALANCE_SHARE * total)
}

/// Required number of exits for a room
///
/// Branches are ordered by priority; the first match wins.
fn required_exit_count(building: &BuildingInfo, occupant_load: u32, travel_distance: f64) -> u32 {
    if occupant_load >= FOUR_EXIT_OCCUPANT_LOAD {
        4
    } else if occupant_load >= THREE_EXIT_OCCUPANT_LOAD {
        3
    } else if occupant_load > building.single_exit_occupant_limit {
        2
    } else if building.sprinkler_protection {
        if travel_distance > building.travel_distance_limit_low {
            2
        } else {
            1
        }
    } else if (occupant_load > LOW_OCCUPANCY_LOAD
        && travel_distance > building.travel_distance_limit_low)
        || (occupant_load <= LOW_OCCUPANCY_LOAD
            && travel_distance > building.travel_distance_limit_high)
    {
        2
    } else {
        1
    }
}

/// Flag every exit and discharge door against the minimum clear size
pub fn flag_door_sizes(snapshot: &mut Snapshot, report: &mut EvaluationReport) {
    for door in &mut snapshot.doors {
        if !(door.is_exit || door.is_discharge_exit) {
            door.has_min_required_size = false;
            continue;
        }
        report.door_count += 1;
        door.has_min_required_size =
            door.width >= MIN_EXIT_DOOR_WIDTH && door.height >= MIN_EXIT_DOOR_HEIGHT;
        if !door.has_min_required_size {
            report.fail(door.id, ElementKind::Door, EgressCheck::MinDoorSize);
        }
    }
}

/// Evaluate every non-corridor room
///
/// Corridors keep their derived fields zeroed (the Room Function Resolver
/// already cleared the load fields).
pub fn evaluate_rooms(snapshot: &mut Snapshot, report: &mut EvaluationReport) {
    let door_widths: FxHashMap<ElementId, f64> =
        snapshot.doors.iter().map(|d| (d.id, d.width)).collect();
    let building = &snapshot.building;

    for room in &mut snapshot.rooms {
        if room.is_corridor {
            room.required_egress_width = 0.0;
            room.required_exit_count = 0;
            room.available_exit_count = 0;
            room.available_egress_width = 0.0;
            room.has_sufficient_exit_count = true;
            room.has_sufficient_egress_width = true;
            room.has_balanced_egress_width = true;
            room.max_occupant_load_exceeded = false;
            room.travel_distance_exceeded = false;
            continue;
        }
        report.room_count += 1;

        room.required_egress_width =
            building.egress_capacity_per_occupant * f64::from(room.occupant_load);
        room.required_exit_count =
            required_exit_count(building, room.occupant_load, room.travel_distance);

        // Validation guarantees every assigned door resolves
        let widths: Vec<f64> = room
            .exit_doors
            .iter()
            .filter_map(|id| door_widths.get(id).copied())
            .collect();
        let (count, total) = door_availability(&widths);
        room.available_exit_count = count;
        room.available_egress_width = total;

        room.has_sufficient_exit_count = room.available_exit_count >= room.required_exit_count;
        room.has_sufficient_egress_width =
            room.available_egress_width >= room.required_egress_width;
        room.has_balanced_egress_width = has_balanced_width(&widths);
        room.max_occupant_load_exceeded = room
            .max_occupant_load
            .is_some_and(|limit| room.occupant_load > limit);
        room.travel_distance_exceeded =
            room.travel_distance > building.travel_distance_limit_overall;

        if !room.has_sufficient_exit_count {
            report.fail(room.id, ElementKind::Room, EgressCheck::ExitCount);
        }
        if !room.has_sufficient_egress_width {
            report.fail(room.id, ElementKind::Room, EgressCheck::EgressWidth);
        }
        if !room.has_balanced_egress_width {
            report.fail(room.id, ElementKind::Room, EgressCheck::BalancedWidth);
        }
        if room.max_occupant_load_exceeded {
            report.fail(room.id, ElementKind::Room, EgressCheck::MaxOccupantLoad);
        }
        if room.travel_distance_exceeded {
            report.fail(room.id, ElementKind::Room, EgressCheck::TravelDistance);
        }
    }
}
