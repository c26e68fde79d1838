//! Mission timeline reconstruction for truck-and-drone deliveries.
//!
//! Takes the geometry produced by an external route optimizer (a truck
//! polyline plus independent drone round trips) and the mission's named
//! sites, and rebuilds a deterministic, time-ordered event timeline with
//! per-route, per-vehicle and per-fleet rollups. Every entry point is a pure
//! function of its arguments.

pub mod config;
pub mod details;
pub mod fleet;
pub mod format;
pub mod matching;
pub mod models;
pub mod progress;
pub mod schedule;
mod significant;
pub mod spatial;
pub mod summary;
pub mod timeline;

pub use config::{
    ConfigError, TimelineConfig, DEPOT_RETURN_RADIUS_M, MATCH_TOLERANCE_DEG, MIN_TRAVEL_SEGMENT_M,
};
pub use details::{route_details, vehicle_details, EventBreakdown, RouteDetail, VehicleDetail};
pub use fleet::{
    assign_sorties, build_fleet_assignment, drone_index_for_sortie, AssignedDrone,
    DroneAssignment, FleetAssignment, FleetMode,
};
pub use format::{format_clock, format_distance, format_duration};
pub use matching::{match_site, match_site_with_tolerance, CoordinateSet};
pub use models::{
    Coordinate, EventKind, EventStatus, Site, SiteKind, Sortie, TimelineEvent, TimelineResult,
    TimelineSummary, VehicleClass,
};
pub use progress::status_at;
pub use schedule::{build_schedule, empty_schedule, Schedule, ScheduleStop, StopKind, VehicleRow};
pub use spatial::{distance, haversine_distance, travel_time_secs};
pub use summary::summarize;
pub use timeline::{drone_events, generate_timeline, merge_events};
