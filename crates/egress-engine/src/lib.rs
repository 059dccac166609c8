// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Egress-Engine - IBC egress rule engine
//!
//! This crate implements the traits defined in `egress-model`: it loads the
//! code lookup tables, resolves building and room defaults, evaluates every
//! room, and aggregates storey and building egress.
//!
//! # Features
//!
//! - **Table-driven defaults** - occupancy-group and room-function tables
//!   with the documented row-20 fallback
//! - **Embedded IBC tables** - usable with no configuration
//! - **All-or-none passes** - a failed pass leaves the snapshot untouched
//! - **Progress reporting** for host progress bars
//!
//! # Example
//!
//! ```ignore
//! use egress_engine::Evaluator;
//! use egress_model::CodeEvaluator;
//!
//! let evaluator = Evaluator::builtin()?;
//! let report = evaluator.evaluate(&mut snapshot)?;
//! for finding in &report.findings {
//!     println!("{} failed {}", finding.element, finding.check.display_name());
//! }
//! ```

mod building;
mod csv;
mod defaults;
mod functions;
mod pass;
mod rooms;
mod storeys;
mod tables;

pub use csv::{Record, RecordScanner};
pub use defaults::{
    CAPACITY_PER_OCCUPANT, CAPACITY_PER_OCCUPANT_REDUCED, STAIR_CAPACITY_PER_OCCUPANT,
    STAIR_CAPACITY_PER_OCCUPANT_REDUCED,
};
pub use rooms::{
    BALANCE_SHARE, FOUR_EXIT_OCCUPANT_LOAD, LOW_OCCUPANCY_LOAD, MIN_EXIT_DOOR_HEIGHT,
    MIN_EXIT_DOOR_WIDTH, THREE_EXIT_OCCUPANT_LOAD,
};
pub use tables::{
    builtin_tables, functions_from_csv, occupancy_from_csv, tables_from_csv, tables_from_files,
};

use egress_model::{
    CodeEvaluator, CodeTables, EvaluationReport, ProgressCallback, Result, Snapshot,
};

/// Main rule engine implementing the `CodeEvaluator` trait
///
/// Holds the code tables for the lifetime of the evaluator; the tables are
/// immutable and shared by every pass.
pub struct Evaluator {
    tables: CodeTables,
}

impl Evaluator {
    /// Create an evaluator over the given tables
    pub fn new(tables: CodeTables) -> Self {
        Self { tables }
    }

    /// Create an evaluator over the embedded IBC-derived default tables
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(builtin_tables()?))
    }

    /// The tables this evaluator runs against
    pub fn tables(&self) -> &CodeTables {
        &self.tables
    }
}

impl CodeEvaluator for Evaluator {
    fn evaluate(&self, snapshot: &mut Snapshot) -> Result<EvaluationReport> {
        pass::run_pass(&self.tables, snapshot, &|_, _| {})
    }

    fn evaluate_with_progress(
        &self,
        snapshot: &mut Snapshot,
        on_progress: ProgressCallback,
    ) -> Result<EvaluationReport> {
        pass::run_pass(&self.tables, snapshot, &move |stage, pct| {
            on_progress(stage, pct)
        })
    }
}

/// Quick evaluation against the embedded default tables
pub fn evaluate(snapshot: &mut Snapshot) -> Result<EvaluationReport> {
    Evaluator::builtin()?.evaluate(snapshot)
}

/// Serialize a report to pretty JSON for export or display
pub fn report_json(report: &EvaluationReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(|e| egress_model::EvalError::other(e.to_string()))
}
