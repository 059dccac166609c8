// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Code table loading
//!
//! Tables come from CSV text - the embedded IBC-derived defaults, a caller
//! string, or files. Any malformed record aborts the load; a table that
//! parsed is internally consistent (unique keys, valid numbers).

use crate::csv::{Record, RecordScanner};
use egress_model::{CodeTables, EvalError, FunctionRow, FunctionTable, OccupancyRow, OccupancyTable, Result};
use rustc_hash::FxHashSet;
use std::fs;
use std::path::Path;

/// Embedded default occupancy-group table
const OCCUPANCY_CSV: &str = include_str!("data/occupancy.csv");
/// Embedded default room-function table
const FUNCTIONS_CSV: &str = include_str!("data/functions.csv");

/// Load the embedded IBC-derived default tables
pub fn builtin_tables() -> Result<CodeTables> {
    Ok(CodeTables::new(
        occupancy_from_csv(OCCUPANCY_CSV)?,
        functions_from_csv(FUNCTIONS_CSV)?,
    ))
}

/// Load both tables from caller-supplied CSV text
pub fn tables_from_csv(occupancy: &str, functions: &str) -> Result<CodeTables> {
    Ok(CodeTables::new(
        occupancy_from_csv(occupancy)?,
        functions_from_csv(functions)?,
    ))
}

/// Load both tables from CSV files
///
/// The only filesystem access in the library, and only through this entry.
pub fn tables_from_files(occupancy: &Path, functions: &Path) -> Result<CodeTables> {
    let occupancy_text = fs::read_to_string(occupancy)?;
    let functions_text = fs::read_to_string(functions)?;
    tables_from_csv(&occupancy_text, &functions_text)
}

/// Parse an occupancy-group table from CSV text
///
/// Columns: group, width per occupant (unsprinklered, sprinklered),
/// overall travel-distance limit (unsprinklered, sprinklered), single-exit
/// occupant limit, single-exit travel-distance limits (load over 30, load
/// up to 30).
pub fn occupancy_from_csv(content: &str) -> Result<OccupancyTable> {
    let mut rows = Vec::new();
    let mut seen = FxHashSet::default();
    for (line, text) in RecordScanner::new(content) {
        let mut record = Record::parse(line, text)?;
        record.expect_len(8)?;
        let row = OccupancyRow {
            group: record.next_str()?.to_string(),
            width_per_occupant: record.next_f64()?,
            width_per_occupant_sprinklered: record.next_f64()?,
            travel_distance: record.next_f64()?,
            travel_distance_sprinklered: record.next_f64()?,
            single_exit_occupant_limit: record.next_u32()?,
            travel_distance_low_occupancy: record.next_f64()?,
            travel_distance_high_occupancy: record.next_f64()?,
        };
        if !seen.insert(row.group.clone()) {
            return Err(EvalError::table(
                line,
                format!("duplicate occupancy group {:?}", row.group),
            ));
        }
        rows.push(row);
    }
    Ok(OccupancyTable::from_rows(rows))
}

/// Parse a room-function table from CSV text
///
/// Columns: function name, area per occupant in m².
pub fn functions_from_csv(content: &str) -> Result<FunctionTable> {
    let mut rows = Vec::new();
    let mut seen = FxHashSet::default();
    for (line, text) in RecordScanner::new(content) {
        let mut record = Record::parse(line, text)?;
        record.expect_len(2)?;
        let row = FunctionRow {
            name: record.next_str()?.to_string(),
            load_factor: record.next_f64()?,
        };
        if !seen.insert(row.name.clone()) {
            return Err(EvalError::table(
                line,
                format!("duplicate room function {:?}", row.name),
            ));
        }
        rows.push(row);
    }
    Ok(FunctionTable::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use egress_model::FALLBACK_ROW_INDEX;

    #[test]
    fn test_builtin_tables_load() {
        let tables = builtin_tables().unwrap();
        assert!(tables.occupancy.len() > FALLBACK_ROW_INDEX);
        assert!(tables.functions.len() > FALLBACK_ROW_INDEX);
    }

    #[test]
    fn test_builtin_business_row() {
        let tables = builtin_tables().unwrap();
        let row = tables.occupancy.find("B").unwrap();
        assert_eq!(row.width_per_occupant, 5.1);
        assert_eq!(row.width_per_occupant_sprinklered, 3.8);
        assert_eq!(row.travel_distance, 60960.0);
        assert_eq!(row.travel_distance_sprinklered, 91440.0);
        assert_eq!(row.single_exit_occupant_limit, 49);
    }

    #[test]
    fn test_builtin_h_groups_not_permitted_unsprinklered() {
        let tables = builtin_tables().unwrap();
        for group in ["H1", "H2", "H3", "H4", "H5"] {
            let row = tables.occupancy.find(group).unwrap();
            assert_eq!(row.travel_distance, -1.0, "group {}", group);
        }
    }

    #[test]
    fn test_builtin_fallback_rows() {
        let tables = builtin_tables().unwrap();
        assert_eq!(tables.occupancy.rows()[FALLBACK_ROW_INDEX].group, "R2");
        assert_eq!(tables.functions.rows()[FALLBACK_ROW_INDEX].name, "Storage");
    }

    #[test]
    fn test_builtin_office_factor() {
        let tables = builtin_tables().unwrap();
        let row = tables.functions.find("Office").unwrap();
        assert_eq!(row.load_factor, 9.3);
    }

    #[test]
    fn test_quoted_function_names() {
        let tables = builtin_tables().unwrap();
        assert!(tables.functions.find("Assembly, concentrated").is_some());
        assert!(tables.functions.find("Kitchen, commercial").is_some());
    }

    #[test]
    fn test_duplicate_group_rejected() {
        let err = occupancy_from_csv(
            "B,5.1,3.8,60960,91440,49,22860,30480\nB,5.1,3.8,60960,91440,49,22860,30480\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_wrong_field_count_rejected() {
        assert!(occupancy_from_csv("B,5.1,3.8\n").is_err());
    }

    #[test]
    fn test_bad_number_rejected() {
        assert!(functions_from_csv("Office,lots\n").is_err());
    }
}
