//! Core data models for truck-and-drone mission timelines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
///
/// Coordinates are never compared exactly by the engine; see
/// [`crate::matching`] for tolerance matching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Set key in `"lat,lng"` form.
    pub fn key(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }

    /// True when both axes differ by less than `tolerance_deg`.
    pub fn approx_eq(&self, other: &Coordinate, tolerance_deg: f64) -> bool {
        (self.lat - other.lat).abs() < tolerance_deg && (self.lng - other.lng).abs() < tolerance_deg
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// Kind of a named mission site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteKind {
    /// Mission start and end point
    Depot,
    /// Delivery point for a customer order
    Order,
    /// Charging station the truck may stop at
    Station,
    /// Unassigned waypoint
    Waypoint,
    /// Hazard marker, never served
    Hazard,
}

/// A named site from mission configuration. The engine only reads sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub kind: SiteKind,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Site {
    pub fn new(id: impl Into<String>, kind: SiteKind, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            kind,
            lat,
            lng,
            label: None,
        }
    }

    /// Attach a display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

/// One drone round trip: launch, delivery and recovery coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sortie {
    /// 1-based position of the excursion in the raw input list
    pub number: u32,
    pub launch: Coordinate,
    pub delivery: Coordinate,
    pub recovery: Coordinate,
}

impl Sortie {
    /// Build a sortie from a raw excursion. Anything other than exactly three
    /// points is rejected.
    pub fn from_points(number: u32, points: &[Coordinate]) -> Option<Self> {
        match points {
            [launch, delivery, recovery] => Some(Self {
                number,
                launch: *launch,
                delivery: *delivery,
                recovery: *recovery,
            }),
            _ => None,
        }
    }

    /// Parse a raw excursion list, numbering by input position and dropping
    /// malformed entries.
    pub fn parse_all(excursions: &[Vec<Coordinate>]) -> Vec<Sortie> {
        excursions
            .iter()
            .zip(1u32..)
            .filter_map(|(points, number)| {
                let sortie = Self::from_points(number, points);
                if sortie.is_none() {
                    tracing::debug!(
                        sortie = number,
                        points = points.len(),
                        "dropping malformed excursion"
                    );
                }
                sortie
            })
            .collect()
    }
}

/// Vehicle class owning an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    Truck,
    Drone,
}

/// Discriminator for timeline events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    TruckDepart,
    /// Aggregated travel between two significant points
    TruckTravel,
    TruckDelivery,
    /// Truck stops to launch a drone
    TruckDroneLaunch,
    /// Truck stops to recover a drone
    TruckDroneRecover,
    TruckCharging,
    TruckReturn,
    DroneLaunch,
    DroneDelivery,
    DroneReturn,
}

impl EventKind {
    pub const fn vehicle(self) -> VehicleClass {
        match self {
            EventKind::DroneLaunch | EventKind::DroneDelivery | EventKind::DroneReturn => {
                VehicleClass::Drone
            }
            _ => VehicleClass::Truck,
        }
    }

    pub const fn is_delivery(self) -> bool {
        matches!(self, EventKind::TruckDelivery | EventKind::DroneDelivery)
    }
}

/// Progress of an event against the mission clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Not yet reached
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// A single entry of the mission timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: String,
    pub kind: EventKind,
    pub vehicle: VehicleClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sortie_number: Option<u32>,
    /// Index into the truck route, for truck events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waypoint_index: Option<usize>,
    pub location: Coordinate,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display name of the served order site
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub served_site: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub served_site_id: Option<String>,
    /// Duration of this segment in seconds
    pub duration_secs: f64,
    /// Elapsed seconds from mission start when the event begins
    pub cumulative_secs: f64,
    /// Distance covered by this segment in meters
    pub distance_m: f64,
    pub status: EventStatus,
}

impl TimelineEvent {
    /// Fresh pending event with no duration, distance or optional fields.
    pub fn new(
        id: impl Into<String>,
        kind: EventKind,
        location: Coordinate,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            vehicle: kind.vehicle(),
            sortie_number: None,
            waypoint_index: None,
            location,
            label: label.into(),
            description: None,
            served_site: None,
            served_site_id: None,
            duration_secs: 0.0,
            cumulative_secs: 0.0,
            distance_m: 0.0,
            status: EventStatus::Pending,
        }
    }

    /// Elapsed seconds at which the event finishes.
    pub fn end_secs(&self) -> f64 {
        self.cumulative_secs + self.duration_secs
    }

    /// Wall-clock start of the event for a mission starting at `mission_start`.
    pub fn starts_at(&self, mission_start: DateTime<Utc>) -> DateTime<Utc> {
        mission_start + seconds_to_duration(self.cumulative_secs)
    }

    /// Wall-clock end of the event for a mission starting at `mission_start`.
    pub fn ends_at(&self, mission_start: DateTime<Utc>) -> DateTime<Utc> {
        mission_start + seconds_to_duration(self.end_secs())
    }
}

fn seconds_to_duration(secs: f64) -> chrono::Duration {
    chrono::Duration::milliseconds((secs * 1000.0).round() as i64)
}

/// Aggregate statistics over a timeline. Always recomputable from the events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineSummary {
    pub total_events: usize,
    pub completed_events: usize,
    pub drone_events: usize,
    pub truck_events: usize,
    /// Total mission duration in seconds
    pub total_duration_secs: f64,
    pub total_distance_m: f64,
    pub drone_distance_m: f64,
    pub truck_distance_m: f64,
    pub delivery_count: usize,
    pub drone_deliveries: usize,
    pub truck_deliveries: usize,
}

/// Global event list plus its summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineResult {
    pub events: Vec<TimelineEvent>,
    pub summary: TimelineSummary,
}

impl TimelineResult {
    /// Timeline with no events and an all-zero summary.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn sortie_requires_exactly_three_points() {
        let a = Coordinate::new(0.0, 0.0);
        assert!(Sortie::from_points(1, &[a, a]).is_none());
        assert!(Sortie::from_points(1, &[a, a, a, a]).is_none());
        let sortie = Sortie::from_points(2, &[a, Coordinate::new(1.0, 1.0), a]).unwrap();
        assert_eq!(sortie.number, 2);
        assert_eq!(sortie.delivery, Coordinate::new(1.0, 1.0));
    }

    #[test]
    fn parse_all_keeps_input_numbering() {
        let a = Coordinate::new(0.0, 0.0);
        let raw = vec![vec![a, a, a], vec![a, a], vec![a, a, a]];
        let sorties = Sortie::parse_all(&raw);
        let numbers: Vec<u32> = sorties.iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 3]);
    }

    #[test]
    fn event_kind_owner() {
        assert_eq!(EventKind::DroneReturn.vehicle(), VehicleClass::Drone);
        assert_eq!(EventKind::TruckDroneLaunch.vehicle(), VehicleClass::Truck);
        assert!(EventKind::TruckDelivery.is_delivery());
        assert!(!EventKind::TruckDroneRecover.is_delivery());
    }

    #[test]
    fn event_projects_onto_wall_clock() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();
        let mut event = TimelineEvent::new(
            "event-1",
            EventKind::TruckDelivery,
            Coordinate::new(0.0, 0.0),
            "Truck Delivery",
        );
        event.cumulative_secs = 90.0;
        event.duration_secs = 360.0;
        assert_eq!(event.starts_at(start), start + chrono::Duration::seconds(90));
        assert_eq!(event.ends_at(start), start + chrono::Duration::seconds(450));
    }

    #[test]
    fn coordinate_key_and_tolerance() {
        let a = Coordinate::new(1.5, -2.25);
        assert_eq!(a.key(), "1.5,-2.25");
        assert!(a.approx_eq(&Coordinate::new(1.50005, -2.25005), 1e-4));
        assert!(!a.approx_eq(&Coordinate::new(1.5002, -2.25), 1e-4));
    }
}
