// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-pass compliance summary

use crate::{CheckState, ElementId, ElementKind};
use serde::{Deserialize, Serialize};

/// The individual egress checks an element can fail
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EgressCheck {
    /// Available exit count below the required count
    ExitCount,
    /// Available egress width below the required width
    EgressWidth,
    /// A single exit carries more than half the available width
    BalancedWidth,
    /// Exit door below the minimum clear size
    MinDoorSize,
    /// Occupant load above the posted room limit
    MaxOccupantLoad,
    /// Travel distance above the overall limit
    TravelDistance,
}

impl EgressCheck {
    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            EgressCheck::ExitCount => "Exit count",
            EgressCheck::EgressWidth => "Egress width",
            EgressCheck::BalancedWidth => "Balanced egress width",
            EgressCheck::MinDoorSize => "Minimum door size",
            EgressCheck::MaxOccupantLoad => "Maximum occupant load",
            EgressCheck::TravelDistance => "Travel distance",
        }
    }
}

/// One failed check on one element
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// The element that failed
    pub element: ElementId,
    /// What kind of element it is
    pub kind: ElementKind,
    /// The check that failed
    pub check: EgressCheck,
}

/// Summary of one evaluation pass
///
/// Collected while the engine writes derived fields, so hosts get the
/// failure list without re-walking the snapshot. Serializable for display
/// or export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct EvaluationReport {
    /// Rooms that participated in egress math (corridors excluded)
    pub room_count: usize,
    /// Storeys aggregated
    pub storey_count: usize,
    /// Doors checked against the minimum exit size
    pub door_count: usize,
    /// Total building occupant load
    pub building_occupant_load: u32,
    /// Building-level (discharge) evaluation outcome;
    /// `NotEvaluated` when no storey is flagged as the discharge level
    pub building_level: CheckState,
    /// Every failed check, in evaluation order
    pub findings: Vec<Finding>,
    /// Number of table lookups that used the fallback row
    pub fallback_lookups: u32,
}

impl EvaluationReport {
    /// Record a failed check
    pub fn fail(&mut self, element: ElementId, kind: ElementKind, check: EgressCheck) {
        self.findings.push(Finding {
            element,
            kind,
            check,
        });
    }

    /// Ids of rooms with at least one failed check
    pub fn non_compliant_rooms(&self) -> Vec<ElementId> {
        let mut ids: Vec<ElementId> = self
            .findings
            .iter()
            .filter(|f| f.kind == ElementKind::Room)
            .map(|f| f.element)
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Number of evaluated rooms with no failed checks
    pub fn compliant_rooms(&self) -> usize {
        self.room_count - self.non_compliant_rooms().len()
    }

    /// Whether the pass found no failures anywhere
    pub fn is_compliant(&self) -> bool {
        self.findings.is_empty() && !self.building_level.is_fail()
    }
}
