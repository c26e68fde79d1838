//! Per-vehicle stop rows for Gantt-style schedule views.

use crate::fleet::{build_fleet_assignment, FleetMode};
use crate::models::{EventKind, TimelineEvent, TimelineResult, VehicleClass};
use serde::{Deserialize, Serialize};

/// Axis horizon used before any route exists.
pub const EMPTY_SCHEDULE_HORIZON_SECS: f64 = 3600.0;

/// Coarse category of a stop on a schedule row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopKind {
    Depot,
    Delivery,
    Launch,
    Return,
    Charging,
    Travel,
}

impl From<EventKind> for StopKind {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::TruckDepart | EventKind::TruckReturn => StopKind::Depot,
            EventKind::TruckDelivery | EventKind::DroneDelivery => StopKind::Delivery,
            EventKind::TruckDroneLaunch | EventKind::DroneLaunch => StopKind::Launch,
            EventKind::TruckDroneRecover | EventKind::DroneReturn => StopKind::Return,
            EventKind::TruckCharging => StopKind::Charging,
            EventKind::TruckTravel => StopKind::Travel,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleStop {
    pub id: String,
    pub kind: StopKind,
    /// Seconds from mission start
    pub start_secs: f64,
    pub duration_secs: f64,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub served_site: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sortie_number: Option<u32>,
    pub distance_m: f64,
    /// Distance covered by this row's vehicle up to the end of the stop
    pub cumulative_distance_m: f64,
}

/// One vehicle's row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRow {
    pub id: String,
    pub name: String,
    pub vehicle: VehicleClass,
    /// 1-based fleet position for drone rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drone_number: Option<usize>,
    pub stops: Vec<ScheduleStop>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub rows: Vec<VehicleRow>,
    /// Length of the merged timeline, used for axis scaling
    pub total_duration_secs: f64,
    pub total_distance_m: f64,
}

fn stops_for<'a>(events: impl IntoIterator<Item = &'a TimelineEvent>) -> Vec<ScheduleStop> {
    let mut travelled = 0.0;
    events
        .into_iter()
        .map(|event| {
            travelled += event.distance_m;
            ScheduleStop {
                id: event.id.clone(),
                kind: event.kind.into(),
                start_secs: event.cumulative_secs,
                duration_secs: event.duration_secs,
                label: event.label.clone(),
                description: event.description.clone(),
                served_site: event.served_site.clone(),
                sortie_number: event.sortie_number,
                distance_m: event.distance_m,
                cumulative_distance_m: travelled,
            }
        })
        .collect()
}

fn truck_row(stops: Vec<ScheduleStop>) -> VehicleRow {
    VehicleRow {
        id: "truck-1".to_owned(),
        name: "Truck".to_owned(),
        vehicle: VehicleClass::Truck,
        drone_number: None,
        stops,
    }
}

fn drone_row(number: usize, stops: Vec<ScheduleStop>) -> VehicleRow {
    VehicleRow {
        id: format!("drone-{number}"),
        name: format!("Drone {number}"),
        vehicle: VehicleClass::Drone,
        drone_number: Some(number),
        stops,
    }
}

/// Rows for the truck and each of `fleet_size` drones, per `mode`.
///
/// Drone rows receive sorties by round robin and list stops in time order.
pub fn build_schedule(result: &TimelineResult, mode: FleetMode, fleet_size: usize) -> Schedule {
    let mut rows = Vec::new();

    if mode.includes_truck() {
        let truck = result
            .events
            .iter()
            .filter(|event| event.vehicle == VehicleClass::Truck);
        rows.push(truck_row(stops_for(truck)));
    }

    if mode.includes_drones() {
        let fleet = build_fleet_assignment(&result.events, fleet_size);
        for drone in &fleet.drones {
            rows.push(drone_row(
                drone.assignment.index + 1,
                stops_for(&drone.events),
            ));
        }
    }

    Schedule {
        rows,
        total_duration_secs: result.summary.total_duration_secs,
        total_distance_m: result.summary.total_distance_m,
    }
}

/// Empty rows previewing the fleet before a route exists.
pub fn empty_schedule(mode: FleetMode, fleet_size: usize) -> Schedule {
    let mut rows = Vec::new();
    if mode.includes_truck() {
        rows.push(truck_row(Vec::new()));
    }
    if mode.includes_drones() {
        rows.extend((1..=fleet_size).map(|number| drone_row(number, Vec::new())));
    }
    Schedule {
        rows,
        total_duration_secs: EMPTY_SCHEDULE_HORIZON_SECS,
        total_distance_m: 0.0,
    }
}
