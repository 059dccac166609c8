// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core traits for egress evaluation
//!
//! These traits define the seams between the host adapter and the engine.

use crate::{EvaluationReport, Result, Snapshot};

/// Progress callback type for evaluation passes
pub type ProgressCallback = Box<dyn Fn(&str, f32) + Send>;

/// Evaluation entry point implemented by an engine
///
/// A pass derives every field the data model marks as derived, at room,
/// storey, and building level, and returns a compliance summary. Passes are
/// deterministic and idempotent: re-running on identical input produces
/// identical output.
///
/// # Example
///
/// ```ignore
/// use egress_model::{CodeEvaluator, Snapshot};
///
/// fn check(evaluator: &dyn CodeEvaluator, snapshot: &mut Snapshot) {
///     match evaluator.evaluate(snapshot) {
///         Ok(report) => println!("{} findings", report.findings.len()),
///         Err(err) => eprintln!("pass aborted: {err}"),
///     }
/// }
/// ```
pub trait CodeEvaluator: Send + Sync {
    /// Run a full evaluation pass over the snapshot
    ///
    /// On success the snapshot's derived fields are populated. On error the
    /// snapshot is left exactly as it was handed in; there are no partial
    /// writes.
    ///
    /// # Arguments
    /// * `snapshot` - The extracted building model, mutated in place
    ///
    /// # Returns
    /// An [`EvaluationReport`] on success, or the first fatal `EvalError`
    fn evaluate(&self, snapshot: &mut Snapshot) -> Result<EvaluationReport>;

    /// Run a full evaluation pass with progress reporting
    ///
    /// # Arguments
    /// * `snapshot` - The extracted building model, mutated in place
    /// * `on_progress` - Callback receiving (stage_name, percent_complete)
    fn evaluate_with_progress(
        &self,
        snapshot: &mut Snapshot,
        on_progress: ProgressCallback,
    ) -> Result<EvaluationReport>;
}

/// Load/store seam implemented by the host adapter
///
/// The core performs no host I/O itself: an adapter extracts a [`Snapshot`]
/// from the host model (converting units to millimetres and square metres
/// and host flags to real booleans), and writes derived fields back after a
/// successful pass.
pub trait SnapshotSource: Send + Sync {
    /// Extract a snapshot from the host model
    fn load(&self) -> Result<Snapshot>;

    /// Persist derived fields back to the host model
    ///
    /// Called only after a successful pass, so adapters may assume every
    /// derived field is populated.
    fn store(&mut self, snapshot: &Snapshot) -> Result<()>;
}
