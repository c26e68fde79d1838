//! Round-robin assignment of sorties to a fixed drone fleet.
//!
//! The partition is display-oriented: it ignores battery, availability and
//! recovery timing, so it is not a feasibility-checked schedule.

use crate::models::{TimelineEvent, VehicleClass};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which vehicles take part in the mission views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FleetMode {
    #[default]
    TruckDrone,
    TruckOnly,
    DronesOnly,
}

impl FleetMode {
    pub const fn includes_truck(self) -> bool {
        matches!(self, FleetMode::TruckDrone | FleetMode::TruckOnly)
    }

    pub const fn includes_drones(self) -> bool {
        matches!(self, FleetMode::TruckDrone | FleetMode::DronesOnly)
    }
}

/// 0-based drone index serving `sortie_number`: `(sortie - 1) mod fleet_size`.
///
/// Returns `None` for an empty fleet or sortie number 0.
pub fn drone_index_for_sortie(sortie_number: u32, fleet_size: usize) -> Option<usize> {
    if fleet_size == 0 || sortie_number == 0 {
        return None;
    }
    Some((sortie_number as usize - 1) % fleet_size)
}

/// Sorties assigned to one drone of the fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroneAssignment {
    /// 0-based position in the fleet
    pub index: usize,
    /// `drone-N`, 1-based
    pub id: String,
    pub name: String,
    /// Ascending sortie numbers
    pub sorties: Vec<u32>,
}

impl DroneAssignment {
    fn new(index: usize) -> Self {
        let number = index + 1;
        Self {
            index,
            id: format!("drone-{number}"),
            name: format!("Drone {number}"),
            sorties: Vec::new(),
        }
    }
}

/// Partition sortie numbers over `fleet_size` drones.
///
/// Every drone gets an entry, possibly with no sorties. Duplicate numbers are
/// collapsed.
pub fn assign_sorties(sortie_numbers: &[u32], fleet_size: usize) -> Vec<DroneAssignment> {
    let mut numbers = sortie_numbers.to_vec();
    numbers.sort_unstable();
    numbers.dedup();

    let mut drones: Vec<DroneAssignment> = (0..fleet_size).map(DroneAssignment::new).collect();
    for number in numbers {
        if let Some(index) = drone_index_for_sortie(number, fleet_size) {
            drones[index].sorties.push(number);
        }
    }
    drones
}

/// A drone with the timeline events of all its sorties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedDrone {
    #[serde(flatten)]
    pub assignment: DroneAssignment,
    /// Sorted by global start time
    pub events: Vec<TimelineEvent>,
}

/// Fleet-wide round-robin grouping of drone events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetAssignment {
    pub drones: Vec<AssignedDrone>,
}

impl FleetAssignment {
    /// Drone serving `sortie_number`, if any.
    pub fn drone_for_sortie(&self, sortie_number: u32) -> Option<&AssignedDrone> {
        self.drones
            .iter()
            .find(|drone| drone.assignment.sorties.contains(&sortie_number))
    }
}

/// Group a timeline's drone events by sortie, keyed by ascending number.
pub fn events_by_sortie(events: &[TimelineEvent]) -> BTreeMap<u32, Vec<&TimelineEvent>> {
    let mut groups: BTreeMap<u32, Vec<&TimelineEvent>> = BTreeMap::new();
    for event in events.iter().filter(|e| e.vehicle == VehicleClass::Drone) {
        groups
            .entry(event.sortie_number.unwrap_or(1))
            .or_default()
            .push(event);
    }
    groups
}

/// Assign the sorties present in `events` to `fleet_size` drones.
pub fn build_fleet_assignment(events: &[TimelineEvent], fleet_size: usize) -> FleetAssignment {
    let groups = events_by_sortie(events);
    let numbers: Vec<u32> = groups.keys().copied().collect();

    let drones = assign_sorties(&numbers, fleet_size)
        .into_iter()
        .map(|assignment| {
            let mut drone_events: Vec<TimelineEvent> = assignment
                .sorties
                .iter()
                .filter_map(|number| groups.get(number))
                .flatten()
                .map(|event| (*event).clone())
                .collect();
            drone_events.sort_by(|a, b| a.cumulative_secs.total_cmp(&b.cumulative_secs));
            AssignedDrone {
                assignment,
                events: drone_events,
            }
        })
        .collect();

    FleetAssignment { drones }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, EventKind};

    #[test]
    fn round_robin_wraps_around_fleet() {
        assert_eq!(drone_index_for_sortie(1, 3), Some(0));
        assert_eq!(drone_index_for_sortie(3, 3), Some(2));
        assert_eq!(drone_index_for_sortie(4, 3), Some(0));
        assert_eq!(drone_index_for_sortie(4, 0), None);
        assert_eq!(drone_index_for_sortie(0, 2), None);
    }

    #[test]
    fn assignment_covers_every_sortie_once() {
        let numbers: Vec<u32> = (1..=7).collect();
        let drones = assign_sorties(&numbers, 3);
        assert_eq!(drones.len(), 3);
        assert_eq!(drones[0].sorties, vec![1, 4, 7]);
        assert_eq!(drones[1].sorties, vec![2, 5]);
        assert_eq!(drones[2].sorties, vec![3, 6]);
        assert_eq!(drones[2].id, "drone-3");

        let mut all: Vec<u32> = drones.iter().flat_map(|d| d.sorties.clone()).collect();
        all.sort_unstable();
        assert_eq!(all, numbers);
    }

    #[test]
    fn idle_drones_are_still_listed() {
        let drones = assign_sorties(&[1], 3);
        assert_eq!(drones.len(), 3);
        assert!(drones[1].sorties.is_empty());
        assert!(assign_sorties(&[1, 2], 0).is_empty());
    }

    #[test]
    fn fleet_events_are_time_sorted() {
        let mut events = Vec::new();
        for (number, start) in [(1u32, 500.0), (3, 100.0), (2, 300.0)] {
            let mut event = TimelineEvent::new(
                format!("s{number}"),
                EventKind::DroneLaunch,
                Coordinate::new(0.0, 0.0),
                "launch",
            );
            event.sortie_number = Some(number);
            event.cumulative_secs = start;
            events.push(event);
        }
        let fleet = build_fleet_assignment(&events, 2);
        let first: Vec<&str> = fleet.drones[0].events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(first, vec!["s3", "s1"]);
        assert_eq!(fleet.drone_for_sortie(2).map(|d| d.assignment.index), Some(1));
        assert!(fleet.drone_for_sortie(9).is_none());
    }

    #[test]
    fn fleet_mode_membership() {
        assert!(FleetMode::TruckDrone.includes_truck());
        assert!(FleetMode::TruckDrone.includes_drones());
        assert!(!FleetMode::TruckOnly.includes_drones());
        assert!(!FleetMode::DronesOnly.includes_truck());
    }
}
