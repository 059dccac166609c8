// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Snapshot - one building's worth of extracted elements

use crate::{BuildingInfo, Door, ElementId, EvalError, Result, Room, Storey};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// In-memory snapshot of the elements an evaluation pass operates on
///
/// Populated by a host adapter from whatever persistent store the host uses,
/// mutated in place by the engine, and handed back for persistence. The core
/// never creates or deletes elements. All lengths are millimetres, areas m².
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The per-model building record
    pub building: BuildingInfo,
    /// All rooms, corridors included
    pub rooms: Vec<Room>,
    /// All exit-relevant doors
    pub doors: Vec<Door>,
    /// All storeys
    pub storeys: Vec<Storey>,
}

impl Snapshot {
    /// Create a snapshot with no elements
    pub fn new(building: BuildingInfo) -> Self {
        Self {
            building,
            rooms: Vec::new(),
            doors: Vec::new(),
            storeys: Vec::new(),
        }
    }

    /// Find a room by id
    pub fn room(&self, id: ElementId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Find a door by id
    pub fn door(&self, id: ElementId) -> Option<&Door> {
        self.doors.iter().find(|d| d.id == id)
    }

    /// Find a storey by id
    pub fn storey(&self, id: ElementId) -> Option<&Storey> {
        self.storeys.iter().find(|s| s.id == id)
    }

    /// Iterate the rooms on a storey
    pub fn rooms_on_storey(&self, storey: ElementId) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(move |r| r.storey == storey)
    }

    /// Iterate the discharge doors on a storey
    pub fn discharge_doors_on(&self, storey: ElementId) -> impl Iterator<Item = &Door> {
        self.doors
            .iter()
            .filter(move |d| d.is_discharge_exit && d.storey == storey)
    }

    /// The storey flagged as the discharge level, if any
    ///
    /// Assumes [`validate`](Self::validate) has rejected snapshots with more
    /// than one flagged storey.
    pub fn discharge_level(&self) -> Option<&Storey> {
        self.storeys.iter().find(|s| s.is_discharge_level)
    }

    /// Check the snapshot for the defects that abort an evaluation pass
    ///
    /// Verifies id uniqueness, reference integrity (assigned exit doors and
    /// storey links), presence of required attributes, numeric sanity, and
    /// that at most one storey is flagged as the discharge level. The first
    /// defect found is returned; nothing is mutated.
    pub fn validate(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        for id in self
            .rooms
            .iter()
            .map(|r| r.id)
            .chain(self.doors.iter().map(|d| d.id))
            .chain(self.storeys.iter().map(|s| s.id))
        {
            if !seen.insert(id) {
                return Err(EvalError::DuplicateId(id));
            }
        }

        let door_ids: FxHashSet<ElementId> = self.doors.iter().map(|d| d.id).collect();
        let storey_ids: FxHashSet<ElementId> = self.storeys.iter().map(|s| s.id).collect();

        for room in &self.rooms {
            if !storey_ids.contains(&room.storey) {
                return Err(EvalError::UnknownStorey {
                    element: room.id,
                    storey: room.storey,
                });
            }
            for door in &room.exit_doors {
                if !door_ids.contains(door) {
                    return Err(EvalError::UnknownDoor {
                        room: room.id,
                        door: *door,
                    });
                }
            }
            if !room.is_corridor && room.function.is_none() {
                return Err(EvalError::missing(room.id, "function"));
            }
            check_finite(room.id, "area", room.area)?;
            check_finite(room.id, "travel_distance", room.travel_distance)?;
        }

        for door in &self.doors {
            if !storey_ids.contains(&door.storey) {
                return Err(EvalError::UnknownStorey {
                    element: door.id,
                    storey: door.storey,
                });
            }
            check_finite(door.id, "width", door.width)?;
            check_finite(door.id, "height", door.height)?;
        }

        if self.storeys.iter().filter(|s| s.is_discharge_level).count() > 1 {
            return Err(EvalError::MultipleDischargeLevels);
        }

        Ok(())
    }
}

/// Reject non-finite or negative measurements
fn check_finite(element: ElementId, attribute: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(EvalError::invalid(element, attribute, "not a finite number"));
    }
    if value < 0.0 {
        return Err(EvalError::invalid(element, attribute, "negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        let mut snapshot = Snapshot::new(BuildingInfo::new("B", true, true));
        snapshot.storeys.push(Storey::new(ElementId(10), "L1"));
        snapshot
            .doors
            .push(Door::new(ElementId(20), ElementId(10), 900.0, 2100.0));
        let mut room = Room::new(ElementId(1), "Office", ElementId(10))
            .with_function("Office")
            .with_area(30.0);
        room.add_exit_door(ElementId(20));
        snapshot.rooms.push(room);
        snapshot
    }

    #[test]
    fn test_valid_snapshot() {
        assert!(snapshot().validate().is_ok());
    }

    #[test]
    fn test_dangling_exit_door() {
        let mut s = snapshot();
        s.rooms[0].add_exit_door(ElementId(99));
        assert!(matches!(
            s.validate(),
            Err(EvalError::UnknownDoor {
                door: ElementId(99),
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_id_across_kinds() {
        let mut s = snapshot();
        s.doors.push(Door::new(ElementId(10), ElementId(10), 900.0, 2100.0));
        assert!(matches!(s.validate(), Err(EvalError::DuplicateId(ElementId(10)))));
    }

    #[test]
    fn test_missing_function() {
        let mut s = snapshot();
        s.rooms[0].function = None;
        assert!(matches!(
            s.validate(),
            Err(EvalError::MissingAttribute { attribute: "function", .. })
        ));
    }

    #[test]
    fn test_corridor_needs_no_function() {
        let mut s = snapshot();
        s.rooms[0].function = None;
        s.rooms[0].is_corridor = true;
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_negative_area_rejected() {
        let mut s = snapshot();
        s.rooms[0].area = -1.0;
        assert!(matches!(
            s.validate(),
            Err(EvalError::InvalidAttribute { attribute: "area", .. })
        ));
    }

    #[test]
    fn test_two_discharge_levels_rejected() {
        let mut s = snapshot();
        s.storeys[0].is_discharge_level = true;
        s.storeys
            .push(Storey::new(ElementId(11), "L2").with_discharge_level(true));
        assert!(matches!(s.validate(), Err(EvalError::MultipleDischargeLevels)));
    }
}
