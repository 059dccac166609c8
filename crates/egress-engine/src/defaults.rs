// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building Group Resolver - building-wide egress defaults
//!
//! Indexes the occupancy table with the building's occupancy group and
//! writes the per-occupant capacities, travel-distance limits, and the
//! single-exit occupant limit onto [`BuildingInfo`].

use egress_model::{BuildingInfo, CodeTables, EvalError, Result};
use log::debug;

/// Egress width per occupant, mm (doors and level components)
pub const CAPACITY_PER_OCCUPANT: f64 = 5.1;
/// Egress width per occupant with sprinklers and emergency communication, mm
pub const CAPACITY_PER_OCCUPANT_REDUCED: f64 = 3.8;
/// Egress width per occupant, mm (stairways)
pub const STAIR_CAPACITY_PER_OCCUPANT: f64 = 7.6;
/// Stairway width per occupant with sprinklers and emergency communication, mm
pub const STAIR_CAPACITY_PER_OCCUPANT_REDUCED: f64 = 5.1;

/// Whether the occupancy group qualifies for the reduced capacity factors
///
/// The code denies the reduction to high-hazard and institutional I-2
/// occupancies. Classification is by substring, not equality - "H" catches
/// every H subgroup. Crude, but it is the behavior of the system of record
/// and is preserved exactly.
fn allows_reduced_capacity(group: &str, sprinklered: bool, emergency_communication: bool) -> bool {
    sprinklered && emergency_communication && !group.contains('H') && !group.contains("I2")
}

/// Resolve building-wide defaults from the occupancy table
///
/// Overwrites every derived default on `building`. Returns the number of
/// lookups that used the fallback row (0 or 1).
pub fn resolve_building_defaults(
    building: &mut BuildingInfo,
    tables: &CodeTables,
) -> Result<u32> {
    let sprinklered = building.sprinkler_protection;

    if allows_reduced_capacity(
        &building.occupancy_group,
        sprinklered,
        building.emergency_communication,
    ) {
        building.egress_capacity_per_occupant = CAPACITY_PER_OCCUPANT_REDUCED;
        building.stair_capacity_per_occupant = STAIR_CAPACITY_PER_OCCUPANT_REDUCED;
    } else {
        building.egress_capacity_per_occupant = CAPACITY_PER_OCCUPANT;
        building.stair_capacity_per_occupant = STAIR_CAPACITY_PER_OCCUPANT;
    }

    let lookup = tables
        .occupancy
        .resolve(&building.occupancy_group)
        .ok_or_else(|| EvalError::FallbackUnavailable {
            table: "occupancy",
            key: building.occupancy_group.clone(),
        })?;
    let row = lookup.row;

    building.travel_distance_limit_overall = if sprinklered {
        row.travel_distance_sprinklered
    } else {
        row.travel_distance
    };
    building.single_exit_occupant_limit = row.single_exit_occupant_limit;

    if sprinklered {
        // The sprinklered column covers both occupancy ranges
        building.travel_distance_limit_low = row.travel_distance_sprinklered;
        building.travel_distance_limit_high = row.travel_distance_sprinklered;
    } else {
        building.travel_distance_limit_low = row.travel_distance_low_occupancy;
        building.travel_distance_limit_high = row.travel_distance_high_occupancy;
    }

    debug!(
        "building defaults: group {:?} capacity {}/{} overall limit {}",
        building.occupancy_group,
        building.egress_capacity_per_occupant,
        building.stair_capacity_per_occupant,
        building.travel_distance_limit_overall
    );

    Ok(u32::from(lookup.fell_back))
}
