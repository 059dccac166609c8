// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element records extracted from the host building model
//!
//! Each record splits into input fields (populated by the host adapter from
//! the model) and derived fields (written by the evaluation engine). Derived
//! fields are overwritten as a whole on every pass; a record is never
//! partially updated.

use crate::ElementId;
use serde::{Deserialize, Serialize};

/// Per-model building record
///
/// Exactly one exists per snapshot. The input fields come from project
/// information; the derived fields are the building-wide egress defaults
/// resolved from the code tables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildingInfo {
    /// Occupancy group id, e.g. "B" or "A2" (matched by substring rules)
    pub occupancy_group: String,
    /// Whether the building has an automatic sprinkler system
    pub sprinkler_protection: bool,
    /// Whether the building has an emergency voice/alarm communication system
    pub emergency_communication: bool,

    // Derived (written by the Building Group Resolver / Building Aggregator)
    /// Required egress width per occupant, mm (doors and level components)
    pub egress_capacity_per_occupant: f64,
    /// Required egress width per occupant, mm (stairways)
    pub stair_capacity_per_occupant: f64,
    /// Occupant load above which a space needs a second exit
    pub single_exit_occupant_limit: u32,
    /// Travel-distance limit for higher-occupancy single-exit spaces, mm
    pub travel_distance_limit_low: f64,
    /// Travel-distance limit for low-occupancy single-exit spaces, mm
    pub travel_distance_limit_high: f64,
    /// Overall travel-distance limit, mm (-1 when not permitted unsprinklered)
    pub travel_distance_limit_overall: f64,
    /// Total building occupant load (sum over storeys)
    pub occupant_load: u32,
    /// The occupancy group requires sprinklers and the building has none
    pub sprinklers_required_not_provided: bool,
}

impl BuildingInfo {
    /// Create a building record with derived fields zeroed
    pub fn new(
        occupancy_group: impl Into<String>,
        sprinkler_protection: bool,
        emergency_communication: bool,
    ) -> Self {
        Self {
            occupancy_group: occupancy_group.into(),
            sprinkler_protection,
            emergency_communication,
            egress_capacity_per_occupant: 0.0,
            stair_capacity_per_occupant: 0.0,
            single_exit_occupant_limit: 0,
            travel_distance_limit_low: 0.0,
            travel_distance_limit_high: 0.0,
            travel_distance_limit_overall: 0.0,
            occupant_load: 0,
            sprinklers_required_not_provided: false,
        }
    }
}

/// A room or space
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Element id
    pub id: ElementId,
    /// Display name
    pub name: String,
    /// Corridors are excluded from occupant-load and capacity rollups
    pub is_corridor: bool,
    /// Room function name (table key); required unless the room is a corridor
    pub function: Option<String>,
    /// Floor area, m²
    pub area: f64,
    /// Path length to the nearest exit, mm
    pub travel_distance: f64,
    /// Host-supplied posted occupant limit, if any
    pub max_occupant_load: Option<u32>,
    /// Doors assigned as this room's exits
    pub exit_doors: Vec<ElementId>,
    /// Containing storey
    pub storey: ElementId,

    // Derived (written by the Room Function Resolver / Room Evaluator)
    /// Area per occupant for the room function, m²
    pub occupant_load_factor: f64,
    /// ceil(area / occupant_load_factor)
    pub occupant_load: u32,
    /// Required total exit width, mm
    pub required_egress_width: f64,
    /// Required number of exits
    pub required_exit_count: u32,
    /// Number of assigned exit doors
    pub available_exit_count: u32,
    /// Sum of assigned exit door widths, mm
    pub available_egress_width: f64,
    /// available_exit_count >= required_exit_count
    pub has_sufficient_exit_count: bool,
    /// available_egress_width >= required_egress_width
    pub has_sufficient_egress_width: bool,
    /// No single exit carries more than half the available width
    pub has_balanced_egress_width: bool,
    /// occupant_load exceeds the posted limit
    pub max_occupant_load_exceeded: bool,
    /// travel_distance exceeds the overall limit
    pub travel_distance_exceeded: bool,
}

impl Room {
    /// Create a room with derived fields zeroed
    pub fn new(id: ElementId, name: impl Into<String>, storey: ElementId) -> Self {
        Self {
            id,
            name: name.into(),
            is_corridor: false,
            function: None,
            area: 0.0,
            travel_distance: 0.0,
            max_occupant_load: None,
            exit_doors: Vec::new(),
            storey,
            occupant_load_factor: 0.0,
            occupant_load: 0,
            required_egress_width: 0.0,
            required_exit_count: 0,
            available_exit_count: 0,
            available_egress_width: 0.0,
            has_sufficient_exit_count: false,
            has_sufficient_egress_width: false,
            has_balanced_egress_width: false,
            max_occupant_load_exceeded: false,
            travel_distance_exceeded: false,
        }
    }

    /// Set the room function
    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    /// Set the floor area, m²
    pub fn with_area(mut self, area: f64) -> Self {
        self.area = area;
        self
    }

    /// Set the travel distance, mm
    pub fn with_travel_distance(mut self, travel_distance: f64) -> Self {
        self.travel_distance = travel_distance;
        self
    }

    /// Mark the room as a corridor
    pub fn with_corridor(mut self, is_corridor: bool) -> Self {
        self.is_corridor = is_corridor;
        self
    }

    /// Set the posted occupant limit
    pub fn with_max_occupant_load(mut self, limit: u32) -> Self {
        self.max_occupant_load = Some(limit);
        self
    }

    /// Assign an exit door (duplicates are ignored)
    pub fn add_exit_door(&mut self, door: ElementId) {
        if !self.exit_doors.contains(&door) {
            self.exit_doors.push(door);
        }
    }

    /// Whether the room participates in egress math
    pub fn is_evaluated(&self) -> bool {
        !self.is_corridor
    }
}

/// A door
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Door {
    /// Element id
    pub id: ElementId,
    /// Clear width, mm
    pub width: f64,
    /// Clear height, mm
    pub height: f64,
    /// Serves as an exit from a room
    pub is_exit: bool,
    /// Discharges occupants out of the building
    pub is_discharge_exit: bool,
    /// Room the door exits from, if known
    pub from_room: Option<ElementId>,
    /// Containing storey
    pub storey: ElementId,

    // Derived (written by the Room Evaluator)
    /// Meets the minimum clear width and height for an exit door
    pub has_min_required_size: bool,
}

impl Door {
    /// Create a door with the derived flag cleared
    pub fn new(id: ElementId, storey: ElementId, width: f64, height: f64) -> Self {
        Self {
            id,
            width,
            height,
            is_exit: false,
            is_discharge_exit: false,
            from_room: None,
            storey,
            has_min_required_size: false,
        }
    }

    /// Mark the door as a room exit
    pub fn with_exit(mut self, is_exit: bool) -> Self {
        self.is_exit = is_exit;
        self
    }

    /// Mark the door as a discharge exit
    pub fn with_discharge_exit(mut self, is_discharge_exit: bool) -> Self {
        self.is_discharge_exit = is_discharge_exit;
        self
    }

    /// Set the room the door exits from
    pub fn with_from_room(mut self, room: ElementId) -> Self {
        self.from_room = Some(room);
        self
    }
}

/// A building storey (level)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Storey {
    /// Element id
    pub id: ElementId,
    /// Display name
    pub name: String,
    /// Elevation in metres
    pub elevation: f64,
    /// Occupants leave the building through this storey
    pub is_discharge_level: bool,

    // Derived (written by the Storey / Building Aggregators)
    /// Sum of non-corridor room occupant loads on this storey
    pub occupant_load: u32,
    /// Required total exit width, mm
    pub required_egress_width: f64,
    /// Required number of exits (never below 2)
    pub required_exit_count: u32,
    /// Number of discharge doors on this storey
    pub available_exit_count: u32,
    /// Sum of discharge door widths, mm
    pub available_egress_width: f64,
    /// available_exit_count >= required_exit_count
    pub has_sufficient_exit_count: bool,
    /// available_egress_width >= required_egress_width
    pub has_sufficient_egress_width: bool,
    /// No single discharge door carries more than half the available width
    pub has_balanced_egress_width: bool,
}

impl Storey {
    /// Create a storey with derived fields zeroed
    pub fn new(id: ElementId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            elevation: 0.0,
            is_discharge_level: false,
            occupant_load: 0,
            required_egress_width: 0.0,
            required_exit_count: 0,
            available_exit_count: 0,
            available_egress_width: 0.0,
            has_sufficient_exit_count: false,
            has_sufficient_egress_width: false,
            has_balanced_egress_width: false,
        }
    }

    /// Set elevation
    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = elevation;
        self
    }

    /// Mark the storey as the discharge level
    pub fn with_discharge_level(mut self, is_discharge_level: bool) -> Self {
        self.is_discharge_level = is_discharge_level;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_exit_door_dedupes() {
        let mut room = Room::new(ElementId(1), "Office", ElementId(10));
        room.add_exit_door(ElementId(2));
        room.add_exit_door(ElementId(3));
        room.add_exit_door(ElementId(2));
        assert_eq!(room.exit_doors, vec![ElementId(2), ElementId(3)]);
    }

    #[test]
    fn test_corridor_not_evaluated() {
        let room = Room::new(ElementId(1), "Corridor", ElementId(10)).with_corridor(true);
        assert!(!room.is_evaluated());
    }
}
