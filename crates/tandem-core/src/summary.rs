//! Aggregate statistics over a finished event list.

use crate::models::{EventKind, EventStatus, TimelineEvent, TimelineSummary, VehicleClass};

/// Reduce a merged event list to its summary.
///
/// Total duration is the end of the last event; distances are the sums of
/// the per-event `distance_m` fields.
pub fn summarize(events: &[TimelineEvent]) -> TimelineSummary {
    let mut summary = TimelineSummary {
        total_events: events.len(),
        total_duration_secs: events.last().map(TimelineEvent::end_secs).unwrap_or(0.0),
        ..TimelineSummary::default()
    };

    for event in events {
        if event.status == EventStatus::Completed {
            summary.completed_events += 1;
        }
        match event.vehicle {
            VehicleClass::Drone => {
                summary.drone_events += 1;
                summary.drone_distance_m += event.distance_m;
            }
            VehicleClass::Truck => {
                summary.truck_events += 1;
                summary.truck_distance_m += event.distance_m;
            }
        }
        match event.kind {
            EventKind::DroneDelivery => summary.drone_deliveries += 1,
            EventKind::TruckDelivery => summary.truck_deliveries += 1,
            _ => {}
        }
    }

    summary.total_distance_m = summary.drone_distance_m + summary.truck_distance_m;
    summary.delivery_count = summary.drone_deliveries + summary.truck_deliveries;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;

    fn event(kind: EventKind, cumulative: f64, duration: f64, distance: f64) -> TimelineEvent {
        let mut event = TimelineEvent::new("e", kind, Coordinate::new(0.0, 0.0), "e");
        event.cumulative_secs = cumulative;
        event.duration_secs = duration;
        event.distance_m = distance;
        event
    }

    #[test]
    fn empty_list_is_all_zero() {
        assert_eq!(summarize(&[]), TimelineSummary::default());
    }

    #[test]
    fn counts_and_distances_split_by_vehicle() {
        let mut done = event(EventKind::TruckDelivery, 100.0, 360.0, 0.0);
        done.status = EventStatus::Completed;
        let events = vec![
            event(EventKind::TruckTravel, 0.0, 100.0, 1000.0),
            done,
            event(EventKind::DroneDelivery, 460.0, 400.0, 500.0),
            event(EventKind::DroneReturn, 860.0, 30.0, 500.0),
        ];
        let summary = summarize(&events);
        assert_eq!(summary.total_events, 4);
        assert_eq!(summary.completed_events, 1);
        assert_eq!(summary.truck_events, 2);
        assert_eq!(summary.drone_events, 2);
        assert_eq!(summary.truck_distance_m, 1000.0);
        assert_eq!(summary.drone_distance_m, 1000.0);
        assert_eq!(summary.total_distance_m, 2000.0);
        assert_eq!(summary.truck_deliveries, 1);
        assert_eq!(summary.drone_deliveries, 1);
        assert_eq!(summary.delivery_count, 2);
        assert_eq!(summary.total_duration_secs, 890.0);
    }
}
