//! Per-route and per-vehicle rollups for tabular views.

use crate::fleet::{assign_sorties, events_by_sortie, FleetMode};
use crate::models::{EventKind, TimelineEvent, VehicleClass};
use serde::{Deserialize, Serialize};

/// Statistics for one logical route: the truck route or a single sortie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDetail {
    /// `truck` or `sortie-N`
    pub id: String,
    pub vehicle: VehicleClass,
    pub name: String,
    pub distance_m: f64,
    pub duration_secs: f64,
    pub event_count: usize,
    pub delivery_count: usize,
    /// Action events, excluding departure, travel and return
    pub stop_count: usize,
    /// Ids of order sites delivered on this route
    pub served_site_ids: Vec<String>,
}

/// Event counts by category for one vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBreakdown {
    pub launches: usize,
    pub landings: usize,
    pub deliveries: usize,
    pub charging_stops: usize,
    pub travel_segments: usize,
}

impl EventBreakdown {
    fn tally<'a>(events: impl IntoIterator<Item = &'a TimelineEvent>) -> Self {
        let mut breakdown = Self::default();
        for event in events {
            match event.kind {
                EventKind::TruckDroneLaunch | EventKind::DroneLaunch => breakdown.launches += 1,
                EventKind::TruckDroneRecover | EventKind::DroneReturn => breakdown.landings += 1,
                EventKind::TruckDelivery | EventKind::DroneDelivery => breakdown.deliveries += 1,
                EventKind::TruckCharging => breakdown.charging_stops += 1,
                EventKind::TruckTravel => breakdown.travel_segments += 1,
                EventKind::TruckDepart | EventKind::TruckReturn => {}
            }
        }
        breakdown
    }
}

/// Statistics for one physical vehicle: the truck or one drone of the fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleDetail {
    /// `truck` or `drone-N`
    pub id: String,
    pub vehicle: VehicleClass,
    pub name: String,
    pub distance_m: f64,
    pub duration_secs: f64,
    pub total_events: usize,
    pub breakdown: EventBreakdown,
    /// Sorties flown, empty for the truck
    pub sorties_handled: Vec<u32>,
    pub served_site_ids: Vec<String>,
}

/// Span from the earliest start to the latest end, 0 with no events.
pub fn active_span_secs<'a>(events: impl IntoIterator<Item = &'a TimelineEvent>) -> f64 {
    let span = events.into_iter().fold(None, |acc: Option<(f64, f64)>, event| {
        let (start, end) = (event.cumulative_secs, event.end_secs());
        Some(match acc {
            Some((lo, hi)) => (lo.min(start), hi.max(end)),
            None => (start, end),
        })
    });
    span.map(|(lo, hi)| hi - lo).unwrap_or(0.0)
}

fn total_distance<'a>(events: impl IntoIterator<Item = &'a TimelineEvent>) -> f64 {
    events.into_iter().map(|event| event.distance_m).sum()
}

fn served_site_ids<'a>(events: impl IntoIterator<Item = &'a TimelineEvent>) -> Vec<String> {
    events
        .into_iter()
        .filter(|event| event.kind.is_delivery())
        .filter_map(|event| event.served_site_id.clone())
        .collect()
}

fn is_stop(kind: EventKind) -> bool {
    matches!(
        kind,
        EventKind::TruckDelivery
            | EventKind::TruckDroneLaunch
            | EventKind::TruckDroneRecover
            | EventKind::TruckCharging
            | EventKind::DroneLaunch
            | EventKind::DroneDelivery
            | EventKind::DroneReturn
    )
}

fn truck_events(events: &[TimelineEvent]) -> Vec<&TimelineEvent> {
    events
        .iter()
        .filter(|event| event.vehicle == VehicleClass::Truck)
        .collect()
}

/// One detail for the truck route and one per sortie, per `mode`.
pub fn route_details(events: &[TimelineEvent], mode: FleetMode) -> Vec<RouteDetail> {
    let mut details = Vec::new();

    if mode.includes_truck() {
        let truck = truck_events(events);
        details.push(RouteDetail {
            id: "truck".to_owned(),
            vehicle: VehicleClass::Truck,
            name: "Truck Route".to_owned(),
            distance_m: total_distance(truck.iter().copied()),
            duration_secs: active_span_secs(truck.iter().copied()),
            event_count: truck.len(),
            delivery_count: truck.iter().filter(|e| e.kind.is_delivery()).count(),
            stop_count: truck.iter().filter(|e| is_stop(e.kind)).count(),
            served_site_ids: served_site_ids(truck.iter().copied()),
        });
    }

    if mode.includes_drones() {
        for (number, sortie) in events_by_sortie(events) {
            details.push(RouteDetail {
                id: format!("sortie-{number}"),
                vehicle: VehicleClass::Drone,
                name: format!("Sortie {number}"),
                distance_m: total_distance(sortie.iter().copied()),
                duration_secs: active_span_secs(sortie.iter().copied()),
                event_count: sortie.len(),
                delivery_count: sortie.iter().filter(|e| e.kind.is_delivery()).count(),
                stop_count: sortie.iter().filter(|e| is_stop(e.kind)).count(),
                served_site_ids: served_site_ids(sortie.iter().copied()),
            });
        }
    }

    details
}

/// One detail for the truck and one per drone of a `fleet_size` fleet.
pub fn vehicle_details(
    events: &[TimelineEvent],
    mode: FleetMode,
    fleet_size: usize,
) -> Vec<VehicleDetail> {
    let mut details = Vec::new();

    if mode.includes_truck() {
        let truck = truck_events(events);
        details.push(VehicleDetail {
            id: "truck".to_owned(),
            vehicle: VehicleClass::Truck,
            name: "Truck".to_owned(),
            distance_m: total_distance(truck.iter().copied()),
            duration_secs: active_span_secs(truck.iter().copied()),
            total_events: truck.len(),
            breakdown: EventBreakdown::tally(truck.iter().copied()),
            sorties_handled: Vec::new(),
            served_site_ids: served_site_ids(truck.iter().copied()),
        });
    }

    if mode.includes_drones() {
        let groups = events_by_sortie(events);
        let numbers: Vec<u32> = groups.keys().copied().collect();

        for assignment in assign_sorties(&numbers, fleet_size) {
            let mut flown: Vec<&TimelineEvent> = assignment
                .sorties
                .iter()
                .filter_map(|number| groups.get(number))
                .flatten()
                .copied()
                .collect();
            flown.sort_by(|a, b| a.cumulative_secs.total_cmp(&b.cumulative_secs));

            details.push(VehicleDetail {
                id: assignment.id,
                vehicle: VehicleClass::Drone,
                name: assignment.name,
                distance_m: total_distance(flown.iter().copied()),
                duration_secs: active_span_secs(flown.iter().copied()),
                total_events: flown.len(),
                breakdown: EventBreakdown::tally(flown.iter().copied()),
                sorties_handled: assignment.sorties,
                served_site_ids: served_site_ids(flown.iter().copied()),
            });
        }
    }

    details
}
