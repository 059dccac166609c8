// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Code lookup tables keyed by occupancy group and room function
//!
//! Tables are ordered row sequences with a hash index built once at
//! construction. Matching is exact string equality. A missed lookup does not
//! fail: it falls back to the row at [`FALLBACK_ROW_INDEX`], reproducing the
//! behavior of the system of record. Every fallback emits a `log::warn!` so
//! hosts can surface the (almost certainly unintended) default to users.

use log::warn;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Row index used when a lookup misses
///
/// Carried over from the system of record, where a failed table search left
/// the row cursor at this position. Flagged for product-owner review; do not
/// "fix" without a compatibility decision.
pub const FALLBACK_ROW_INDEX: usize = 20;

/// Sentinel for travel-distance columns that do not apply
///
/// Appears where the code forbids the configuration outright, e.g. an
/// unsprinklered H-group building has no permitted travel distance.
pub const NOT_APPLICABLE: f64 = -1.0;

/// One row of the occupancy-group table
///
/// Lengths are millimetres. Column order matches the CSV sources.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OccupancyRow {
    /// Occupancy group id, e.g. "B" or "A2"
    pub group: String,
    /// Egress width per occupant without sprinklers, mm
    pub width_per_occupant: f64,
    /// Egress width per occupant with sprinklers, mm
    pub width_per_occupant_sprinklered: f64,
    /// Overall travel-distance limit without sprinklers, mm
    pub travel_distance: f64,
    /// Overall travel-distance limit with sprinklers, mm
    pub travel_distance_sprinklered: f64,
    /// Occupant load above which a space needs a second exit
    pub single_exit_occupant_limit: u32,
    /// Single-exit travel-distance limit, occupant load over 30, mm
    pub travel_distance_low_occupancy: f64,
    /// Single-exit travel-distance limit, occupant load up to 30, mm
    pub travel_distance_high_occupancy: f64,
}

/// One row of the room-function table
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionRow {
    /// Room function name, e.g. "Office"
    pub name: String,
    /// Area per occupant, m²
    pub load_factor: f64,
}

/// Result of a table resolution
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lookup<'a, R> {
    /// The matched (or fallback) row
    pub row: &'a R,
    /// Whether the fallback row was used
    pub fell_back: bool,
}

/// Occupancy-group table with exact-match index and documented fallback
#[derive(Clone, Debug, Default)]
pub struct OccupancyTable {
    rows: Vec<OccupancyRow>,
    index: FxHashMap<String, usize>,
}

impl OccupancyTable {
    /// Build a table from an ordered row sequence
    ///
    /// When two rows share a group id the first occurrence wins, matching
    /// the find-first search of the system of record. Loaders are expected
    /// to reject duplicates before construction.
    pub fn from_rows(rows: Vec<OccupancyRow>) -> Self {
        let mut index = FxHashMap::default();
        for (i, row) in rows.iter().enumerate() {
            index.entry(row.group.clone()).or_insert(i);
        }
        Self { rows, index }
    }

    /// Exact lookup, no fallback
    pub fn find(&self, group: &str) -> Option<&OccupancyRow> {
        self.index.get(group).map(|&i| &self.rows[i])
    }

    /// Lookup with index-20 fallback
    ///
    /// Returns `None` only when the lookup misses and the table has no row
    /// at [`FALLBACK_ROW_INDEX`]; callers treat that as a configuration
    /// error.
    pub fn resolve(&self, group: &str) -> Option<Lookup<'_, OccupancyRow>> {
        if let Some(row) = self.find(group) {
            return Some(Lookup {
                row,
                fell_back: false,
            });
        }
        let row = self.rows.get(FALLBACK_ROW_INDEX)?;
        warn!(
            "no occupancy row for {:?}, falling back to row {} ({:?})",
            group, FALLBACK_ROW_INDEX, row.group
        );
        Some(Lookup {
            row,
            fell_back: true,
        })
    }

    /// Rows in table order
    pub fn rows(&self) -> &[OccupancyRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Room-function table with exact-match index and documented fallback
#[derive(Clone, Debug, Default)]
pub struct FunctionTable {
    rows: Vec<FunctionRow>,
    index: FxHashMap<String, usize>,
}

impl FunctionTable {
    /// Build a table from an ordered row sequence (first duplicate wins)
    pub fn from_rows(rows: Vec<FunctionRow>) -> Self {
        let mut index = FxHashMap::default();
        for (i, row) in rows.iter().enumerate() {
            index.entry(row.name.clone()).or_insert(i);
        }
        Self { rows, index }
    }

    /// Exact lookup, no fallback
    pub fn find(&self, name: &str) -> Option<&FunctionRow> {
        self.index.get(name).map(|&i| &self.rows[i])
    }

    /// Lookup with index-20 fallback
    pub fn resolve(&self, name: &str) -> Option<Lookup<'_, FunctionRow>> {
        if let Some(row) = self.find(name) {
            return Some(Lookup {
                row,
                fell_back: false,
            });
        }
        let row = self.rows.get(FALLBACK_ROW_INDEX)?;
        warn!(
            "no room function row for {:?}, falling back to row {} ({:?})",
            name, FALLBACK_ROW_INDEX, row.name
        );
        Some(Lookup {
            row,
            fell_back: true,
        })
    }

    /// Rows in table order
    pub fn rows(&self) -> &[FunctionRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The table bundle an evaluation pass runs against
///
/// Immutable for the duration of a pass and safe to share across threads.
#[derive(Clone, Debug, Default)]
pub struct CodeTables {
    /// Occupancy-group table
    pub occupancy: OccupancyTable,
    /// Room-function table
    pub functions: FunctionTable,
}

impl CodeTables {
    /// Bundle two tables
    pub fn new(occupancy: OccupancyTable, functions: FunctionTable) -> Self {
        Self {
            occupancy,
            functions,
        }
    }
}
