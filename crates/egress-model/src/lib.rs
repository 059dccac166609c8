// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Egress-Model - Shared types and trait definitions for egress code evaluation
//!
//! This crate provides the core abstractions for evaluating a building model
//! against IBC means-of-egress requirements. It defines the element records a
//! host extracts from its model, the code lookup tables that drive parameter
//! derivation, and the traits an evaluation engine implements.
//!
//! # Architecture
//!
//! The crate is organized around a few key pieces:
//!
//! - [`Snapshot`] - One building's worth of elements, owned by value
//! - [`CodeTables`] - Occupancy-group and room-function lookup tables
//! - [`CodeEvaluator`] - Entry point implemented by an evaluation engine
//! - [`SnapshotSource`] - Load/store seam implemented by the host adapter
//! - [`EvaluationReport`] - Per-pass compliance summary
//!
//! # Example
//!
//! ```ignore
//! use egress_model::{CodeEvaluator, Snapshot};
//!
//! // Use any engine that implements CodeEvaluator
//! let evaluator: Box<dyn CodeEvaluator> = get_evaluator();
//! let report = evaluator.evaluate(&mut snapshot)?;
//! println!("{} of {} rooms compliant", report.compliant_rooms(), report.room_count);
//! ```
//!
//! All lengths are millimetres and all areas square metres; unit conversion
//! from the host's native units is the adapter's responsibility.

pub mod entities;
pub mod error;
pub mod report;
pub mod snapshot;
pub mod tables;
pub mod traits;
pub mod types;

// Re-export all public types
pub use entities::*;
pub use error::*;
pub use report::*;
pub use snapshot::*;
pub use tables::*;
pub use traits::*;
pub use types::*;
