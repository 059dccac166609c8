// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Storey Egress Aggregator
//!
//! Rolls room occupant loads up to their storey and checks each storey's
//! discharge doors against the resulting requirements.

use crate::rooms::{door_availability, has_balanced_width, FOUR_EXIT_OCCUPANT_LOAD, THREE_EXIT_OCCUPANT_LOAD};
use egress_model::{ElementKind, EgressCheck, EvaluationReport, Snapshot, Storey};

/// Required number of exits for a storey
///
/// Thresholds are exclusive here, unlike the room rule, and a storey never
/// requires fewer than two exits.
pub(crate) fn required_storey_exit_count(occupant_load: u32) -> u32 {
    if occupant_load > FOUR_EXIT_OCCUPANT_LOAD {
        4
    } else if occupant_load > THREE_EXIT_OCCUPANT_LOAD {
        3
    } else {
        2
    }
}

/// Write a storey's derived egress fields from an occupant load and the
/// widths of its discharge doors
///
/// Shared with the Building Aggregator, which re-runs it for the discharge
/// level with the building occupant load substituted.
pub(crate) fn apply_storey_egress(
    storey: &mut Storey,
    occupant_load: u32,
    capacity_per_occupant: f64,
    widths: &[f64],
) {
    storey.required_egress_width = capacity_per_occupant * f64::from(occupant_load);
    storey.required_exit_count = required_storey_exit_count(occupant_load);

    let (count, total) = door_availability(widths);
    storey.available_exit_count = count;
    storey.available_egress_width = total;

    storey.has_sufficient_exit_count = count >= storey.required_exit_count;
    storey.has_sufficient_egress_width = total >= storey.required_egress_width;
    storey.has_balanced_egress_width = has_balanced_width(widths);
}

/// Record a storey's failed checks
pub(crate) fn report_storey(storey: &Storey, report: &mut EvaluationReport) {
    if !storey.has_sufficient_exit_count {
        report.fail(storey.id, ElementKind::Storey, EgressCheck::ExitCount);
    }
    if !storey.has_sufficient_egress_width {
        report.fail(storey.id, ElementKind::Storey, EgressCheck::EgressWidth);
    }
    if !storey.has_balanced_egress_width {
        report.fail(storey.id, ElementKind::Storey, EgressCheck::BalancedWidth);
    }
}

/// Aggregate every storey
///
/// Findings for the discharge level are recorded by the Building
/// Aggregator, which overwrites its fields with the building-level result.
pub fn aggregate_storeys(snapshot: &mut Snapshot, report: &mut EvaluationReport) {
    let capacity = snapshot.building.egress_capacity_per_occupant;

    for i in 0..snapshot.storeys.len() {
        let id = snapshot.storeys[i].id;
        let occupant_load = snapshot
            .rooms_on_storey(id)
            .filter(|r| r.is_evaluated())
            .map(|r| r.occupant_load)
            .sum();
        let widths: Vec<f64> = snapshot.discharge_doors_on(id).map(|d| d.width).collect();

        let storey = &mut snapshot.storeys[i];
        storey.occupant_load = occupant_load;
        apply_storey_egress(storey, occupant_load, capacity, &widths);

        report.storey_count += 1;
        if !storey.is_discharge_level {
            report_storey(storey, report);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egress_model::{BuildingInfo, Door, ElementId, Room};

    fn snapshot() -> Snapshot {
        let mut building = BuildingInfo::new("B", false, false);
        building.egress_capacity_per_occupant = 5.1;
        let mut snapshot = Snapshot::new(building);

        snapshot.storeys.push(Storey::new(ElementId(10), "L1"));
        snapshot.storeys.push(Storey::new(ElementId(11), "L2"));

        let mut office = Room::new(ElementId(1), "Office", ElementId(10)).with_function("Office");
        office.occupant_load = 40;
        let mut lab = Room::new(ElementId(2), "Lab", ElementId(10)).with_function("Laboratory");
        lab.occupant_load = 25;
        let mut corridor = Room::new(ElementId(3), "Corridor", ElementId(10)).with_corridor(true);
        // A stale load on a corridor must never reach the rollup
        corridor.occupant_load = 99;
        let mut upstairs = Room::new(ElementId(4), "Office", ElementId(11)).with_function("Office");
        upstairs.occupant_load = 12;
        snapshot.rooms.extend([office, lab, corridor, upstairs]);

        snapshot.doors.push(
            Door::new(ElementId(20), ElementId(10), 950.0, 2100.0).with_discharge_exit(true),
        );
        snapshot.doors.push(
            Door::new(ElementId(21), ElementId(10), 900.0, 2100.0).with_discharge_exit(true),
        );
        // Exit door that is not a discharge exit: excluded from storey math
        snapshot
            .doors
            .push(Door::new(ElementId(22), ElementId(10), 2000.0, 2100.0).with_exit(true));
        snapshot
    }

    #[test]
    fn test_storey_exit_count_thresholds() {
        assert_eq!(required_storey_exit_count(1001), 4);
        assert_eq!(required_storey_exit_count(1000), 3);
        assert_eq!(required_storey_exit_count(501), 3);
        assert_eq!(required_storey_exit_count(500), 2);
        assert_eq!(required_storey_exit_count(0), 2);
    }

    #[test]
    fn test_occupant_load_excludes_corridors() {
        let mut s = snapshot();
        let mut report = EvaluationReport::default();
        aggregate_storeys(&mut s, &mut report);
        assert_eq!(s.storeys[0].occupant_load, 65);
        assert_eq!(s.storeys[1].occupant_load, 12);
        assert_eq!(report.storey_count, 2);
    }

    #[test]
    fn test_discharge_doors_only() {
        let mut s = snapshot();
        let mut report = EvaluationReport::default();
        aggregate_storeys(&mut s, &mut report);
        let storey = &s.storeys[0];
        assert_eq!(storey.available_exit_count, 2);
        assert_eq!(storey.available_egress_width, 1850.0);
        // 65 occupants at 5.1 mm each
        assert_eq!(storey.required_egress_width, 331.5);
        assert!(storey.has_sufficient_exit_count);
        assert!(storey.has_sufficient_egress_width);
        assert!(storey.has_balanced_egress_width);
    }

    #[test]
    fn test_storey_without_discharge_doors_fails() {
        let mut s = snapshot();
        let mut report = EvaluationReport::default();
        aggregate_storeys(&mut s, &mut report);
        // L2 has no discharge doors but still requires two exits
        let storey = &s.storeys[1];
        assert_eq!(storey.required_exit_count, 2);
        assert_eq!(storey.available_exit_count, 0);
        assert!(!storey.has_sufficient_exit_count);
        assert!(report
            .findings
            .iter()
            .any(|f| f.element == ElementId(11) && f.check == EgressCheck::ExitCount));
    }

    #[test]
    fn test_unbalanced_discharge_pair() {
        // Scenario: 1000 + 1100 mm discharge doors; the wider one carries
        // 52.4% of the width, so the balance check fails
        let mut s = snapshot();
        s.doors[0].width = 1000.0;
        s.doors[1].width = 1100.0;
        let mut report = EvaluationReport::default();
        aggregate_storeys(&mut s, &mut report);
        assert!(!s.storeys[0].has_balanced_egress_width);
        assert!(report
            .findings
            .iter()
            .any(|f| f.element == ElementId(10) && f.check == EgressCheck::BalancedWidth));
    }
}
