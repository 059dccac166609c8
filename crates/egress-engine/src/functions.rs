// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room Function Resolver - occupant-load factors and occupant loads

use egress_model::{CodeTables, EvalError, Result, Room};

/// Resolve load factors and occupant loads for every room
///
/// Non-corridor rooms get `occupant_load_factor` from the function table
/// (fallback row on a miss) and `occupant_load = ceil(area / factor)` -
/// a partial occupant always rounds up. Corridors are excluded from egress
/// math and have both fields zeroed.
///
/// Returns the number of lookups that used the fallback row.
pub fn resolve_room_functions(rooms: &mut [Room], tables: &CodeTables) -> Result<u32> {
    let mut fallbacks = 0;

    for room in rooms.iter_mut() {
        if room.is_corridor {
            room.occupant_load_factor = 0.0;
            room.occupant_load = 0;
            continue;
        }

        let function = room
            .function
            .as_deref()
            .ok_or_else(|| EvalError::missing(room.id, "function"))?;
        let lookup = tables
            .functions
            .resolve(function)
            .ok_or_else(|| EvalError::FallbackUnavailable {
                table: "room function",
                key: function.to_string(),
            })?;
        if lookup.fell_back {
            fallbacks += 1;
        }

        let factor = lookup.row.load_factor;
        if !factor.is_finite() || factor <= 0.0 {
            return Err(EvalError::invalid(
                room.id,
                "occupant_load_factor",
                format!("load factor {} for function {:?}", factor, lookup.row.name),
            ));
        }

        room.occupant_load_factor = factor;
        room.occupant_load = (room.area / factor).ceil() as u32;
    }

    Ok(fallbacks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{builtin_tables, tables_from_csv};
    use egress_model::ElementId;

    fn office(area: f64) -> Room {
        Room::new(ElementId(1), "Office", ElementId(10))
            .with_function("Office")
            .with_area(area)
    }

    #[test]
    fn test_partial_occupant_rounds_up() {
        // 100 m² at 9.3 m² per occupant is 10.75 -> 11
        let tables = builtin_tables().unwrap();
        let mut rooms = vec![office(100.0)];
        resolve_room_functions(&mut rooms, &tables).unwrap();
        assert_eq!(rooms[0].occupant_load_factor, 9.3);
        assert_eq!(rooms[0].occupant_load, 11);
    }

    #[test]
    fn test_empty_room_has_zero_load() {
        let tables = builtin_tables().unwrap();
        let mut rooms = vec![office(0.0)];
        resolve_room_functions(&mut rooms, &tables).unwrap();
        assert_eq!(rooms[0].occupant_load, 0);
    }

    #[test]
    fn test_load_monotonic_in_area() {
        let tables = builtin_tables().unwrap();
        let mut last = 0;
        for area in [10.0, 10.5, 37.2, 37.3, 200.0, 1000.0] {
            let mut rooms = vec![office(area)];
            resolve_room_functions(&mut rooms, &tables).unwrap();
            assert!(rooms[0].occupant_load >= last, "area {}", area);
            last = rooms[0].occupant_load;
        }
    }

    #[test]
    fn test_corridor_zeroed() {
        let tables = builtin_tables().unwrap();
        let mut rooms = vec![Room::new(ElementId(2), "Corridor", ElementId(10))
            .with_corridor(true)
            .with_area(50.0)];
        let fallbacks = resolve_room_functions(&mut rooms, &tables).unwrap();
        assert_eq!(fallbacks, 0);
        assert_eq!(rooms[0].occupant_load, 0);
        assert_eq!(rooms[0].occupant_load_factor, 0.0);
    }

    #[test]
    fn test_unknown_function_falls_back() {
        let tables = builtin_tables().unwrap();
        let mut rooms = vec![office(100.0)];
        rooms[0].function = Some("Bike shed".to_string());
        let fallbacks = resolve_room_functions(&mut rooms, &tables).unwrap();
        assert_eq!(fallbacks, 1);
        // Fallback row is Storage at 27.9 m² per occupant
        assert_eq!(rooms[0].occupant_load_factor, 27.9);
        assert_eq!(rooms[0].occupant_load, 4);
    }

    #[test]
    fn test_missing_function_is_fatal() {
        let tables = builtin_tables().unwrap();
        let mut rooms = vec![Room::new(ElementId(3), "Unnamed", ElementId(10)).with_area(10.0)];
        let err = resolve_room_functions(&mut rooms, &tables).unwrap_err();
        assert!(matches!(err, EvalError::MissingAttribute { .. }));
    }

    #[test]
    fn test_nonpositive_factor_is_fatal() {
        let tables = tables_from_csv(
            "B,5.1,3.8,60960,91440,49,22860,30480\n",
            "Office,0\n",
        )
        .unwrap();
        let mut rooms = vec![office(10.0)];
        let err = resolve_room_functions(&mut rooms, &tables).unwrap_err();
        assert!(matches!(err, EvalError::InvalidAttribute { .. }));
    }
}
