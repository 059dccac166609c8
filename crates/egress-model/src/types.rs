// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types shared across the egress evaluation system

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe element identifier
///
/// Wraps the host model's raw element id (e.g. a Revit ElementId value).
/// The core treats ids as opaque; only equality matters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ElementId {
    fn from(id: u64) -> Self {
        ElementId(id)
    }
}

impl From<ElementId> for u64 {
    fn from(id: ElementId) -> Self {
        id.0
    }
}

/// Kind of element a record describes, used in diagnostics
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// A room or space
    Room,
    /// A door
    Door,
    /// A building storey (level)
    Storey,
    /// The per-model building record
    Building,
}

impl ElementKind {
    /// Get display name for diagnostics and UI
    pub fn display_name(&self) -> &'static str {
        match self {
            ElementKind::Room => "Room",
            ElementKind::Door => "Door",
            ElementKind::Storey => "Storey",
            ElementKind::Building => "Building",
        }
    }
}

/// Compliance state of a single egress check
///
/// `NotEvaluated` covers corridors (excluded from egress math) and the
/// building level when no discharge storey exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckState {
    /// Check ran and passed
    Pass,
    /// Check ran and failed
    Fail,
    /// Check did not apply to this element
    #[default]
    NotEvaluated,
}

impl CheckState {
    /// Build from a boolean check result
    pub fn from_bool(ok: bool) -> Self {
        if ok {
            CheckState::Pass
        } else {
            CheckState::Fail
        }
    }

    /// Whether this state counts as a failure
    pub fn is_fail(&self) -> bool {
        matches!(self, CheckState::Fail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_id_display() {
        assert_eq!(ElementId(42).to_string(), "#42");
    }

    #[test]
    fn test_check_state_from_bool() {
        assert_eq!(CheckState::from_bool(true), CheckState::Pass);
        assert!(CheckState::from_bool(false).is_fail());
        assert!(!CheckState::NotEvaluated.is_fail());
    }
}
