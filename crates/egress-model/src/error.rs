// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for egress evaluation

use crate::ElementId;
use thiserror::Error;

/// Result type alias for evaluation operations
pub type Result<T> = std::result::Result<T, EvalError>;

/// Errors that can occur while loading tables or evaluating a snapshot
///
/// Every variant is fatal for the operation that raised it: a failed table
/// load produces no table, and a failed evaluation pass leaves the caller's
/// snapshot untouched. Lookup misses are not errors - they fall back to the
/// documented default row and are reported through the `log` facade.
#[derive(Error, Debug)]
pub enum EvalError {
    /// Malformed record in a code table
    #[error("Invalid table record at line {line}: {message}")]
    InvalidTable { line: usize, message: String },

    /// Lookup missed and the table has no fallback row
    #[error("No {table} row for key {key:?} and no fallback row available")]
    FallbackUnavailable { table: &'static str, key: String },

    /// Required attribute missing on an element
    #[error("Missing required attribute `{attribute}` on element {element}")]
    MissingAttribute {
        element: ElementId,
        attribute: &'static str,
    },

    /// Attribute present but unusable
    #[error("Invalid attribute `{attribute}` on element {element}: {message}")]
    InvalidAttribute {
        element: ElementId,
        attribute: &'static str,
        message: String,
    },

    /// Two elements share an id
    #[error("Duplicate element id {0}")]
    DuplicateId(ElementId),

    /// Room references a door that is not in the snapshot
    #[error("Room {room} references unknown door {door}")]
    UnknownDoor { room: ElementId, door: ElementId },

    /// Element references a storey that is not in the snapshot
    #[error("Element {element} references unknown storey {storey}")]
    UnknownStorey {
        element: ElementId,
        storey: ElementId,
    },

    /// More than one storey is flagged as the discharge level
    #[error("More than one storey is flagged as the discharge level")]
    MultipleDischargeLevels,

    /// IO error (table file loading)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl EvalError {
    /// Create a new table error
    pub fn table(line: usize, msg: impl Into<String>) -> Self {
        EvalError::InvalidTable {
            line,
            message: msg.into(),
        }
    }

    /// Create a new missing-attribute error
    pub fn missing(element: ElementId, attribute: &'static str) -> Self {
        EvalError::MissingAttribute { element, attribute }
    }

    /// Create a new invalid-attribute error
    pub fn invalid(element: ElementId, attribute: &'static str, msg: impl Into<String>) -> Self {
        EvalError::InvalidAttribute {
            element,
            attribute,
            message: msg.into(),
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        EvalError::Other(msg.into())
    }
}
