//! Plain-text tables for the demo output.

use chrono::{DateTime, Utc};
use std::fmt::{self, Write};
use tandem_core::{
    format_clock, format_distance, format_duration, FleetAssignment, RouteDetail, Schedule,
    TimelineResult, TimelineSummary, VehicleDetail,
};

/// One line per event, with an optional wall-clock column.
pub fn write_timeline(
    out: &mut impl Write,
    result: &TimelineResult,
    mission_start: Option<DateTime<Utc>>,
) -> fmt::Result {
    writeln!(out, "Timeline ({} events)", result.events.len())?;
    for event in &result.events {
        let wall = mission_start
            .map(|start| format!(" {}", event.starts_at(start).format("%H:%M:%S")))
            .unwrap_or_default();
        let sortie = event
            .sortie_number
            .map(|n| format!("#{n}"))
            .unwrap_or_default();
        write!(
            out,
            "  {:>8}{wall}  {:<5} {:<3} {:<36} {:>8} {:>7}",
            format_clock(event.cumulative_secs),
            format!("{:?}", event.vehicle).to_lowercase(),
            sortie,
            event.label,
            format_duration(event.duration_secs),
            format_distance(event.distance_m),
        )?;
        if let Some(site) = &event.served_site {
            write!(out, "  [{site}]")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_summary(out: &mut impl Write, summary: &TimelineSummary) -> fmt::Result {
    writeln!(out, "Summary")?;
    writeln!(
        out,
        "  events      {} ({} truck, {} drone, {} completed)",
        summary.total_events, summary.truck_events, summary.drone_events, summary.completed_events
    )?;
    writeln!(
        out,
        "  duration    {}",
        format_duration(summary.total_duration_secs)
    )?;
    writeln!(
        out,
        "  distance    {} ({} truck, {} drone)",
        format_distance(summary.total_distance_m),
        format_distance(summary.truck_distance_m),
        format_distance(summary.drone_distance_m)
    )?;
    writeln!(
        out,
        "  deliveries  {} ({} truck, {} drone)",
        summary.delivery_count, summary.truck_deliveries, summary.drone_deliveries
    )
}

pub fn write_fleet(out: &mut impl Write, fleet: &FleetAssignment) -> fmt::Result {
    writeln!(out, "Fleet")?;
    for drone in &fleet.drones {
        let sorties: Vec<String> = drone
            .assignment
            .sorties
            .iter()
            .map(|n| n.to_string())
            .collect();
        let sorties = if sorties.is_empty() {
            "idle".to_string()
        } else {
            format!("sorties {}", sorties.join(", "))
        };
        writeln!(
            out,
            "  {:<8} {:<20} {} events",
            drone.assignment.name,
            sorties,
            drone.events.len()
        )?;
    }
    Ok(())
}

pub fn write_route_details(out: &mut impl Write, details: &[RouteDetail]) -> fmt::Result {
    writeln!(out, "Routes")?;
    for detail in details {
        writeln!(
            out,
            "  {:<12} {:>7} {:>8}  {} stops, {} deliveries  {}",
            detail.name,
            format_distance(detail.distance_m),
            format_duration(detail.duration_secs),
            detail.stop_count,
            detail.delivery_count,
            detail.served_site_ids.join(" ")
        )?;
    }
    Ok(())
}

pub fn write_vehicle_details(out: &mut impl Write, details: &[VehicleDetail]) -> fmt::Result {
    writeln!(out, "Vehicles")?;
    for detail in details {
        let b = &detail.breakdown;
        writeln!(
            out,
            "  {:<8} {:>7} {:>8}  launch {} land {} deliver {} charge {} travel {}",
            detail.name,
            format_distance(detail.distance_m),
            format_duration(detail.duration_secs),
            b.launches,
            b.landings,
            b.deliveries,
            b.charging_stops,
            b.travel_segments
        )?;
    }
    Ok(())
}

pub fn write_schedule(out: &mut impl Write, schedule: &Schedule) -> fmt::Result {
    writeln!(
        out,
        "Schedule (horizon {})",
        format_clock(schedule.total_duration_secs)
    )?;
    for row in &schedule.rows {
        writeln!(out, "  {}", row.name)?;
        if row.stops.is_empty() {
            writeln!(out, "    (no stops)")?;
        }
        for stop in &row.stops {
            writeln!(
                out,
                "    {:>8} +{:<8} {:<9} {:<36} {:>7}",
                format_clock(stop.start_secs),
                format_duration(stop.duration_secs),
                format!("{:?}", stop.kind).to_lowercase(),
                stop.label,
                format_distance(stop.cumulative_distance_m)
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tandem_core::{
        build_fleet_assignment, build_schedule, empty_schedule, generate_timeline,
        route_details, vehicle_details, FleetMode, TimelineConfig,
    };

    use crate::scenarios::create_mixed_scenario;

    fn mixed() -> TimelineResult {
        let scenario = create_mixed_scenario(33.6846, -117.8265);
        generate_timeline(
            &scenario.route,
            &scenario.excursions,
            &scenario.sites,
            &TimelineConfig::default(),
        )
    }

    #[test]
    fn test_timeline_lists_every_event() {
        let result = mixed();
        let mut out = String::new();
        write_timeline(&mut out, &result, None).unwrap();
        assert_eq!(out.lines().count(), result.events.len() + 1);
        assert!(out.contains("Truck Departs Depot"));
        assert!(out.contains("[Customer 2]"));
    }

    #[test]
    fn test_wall_clock_column() {
        let result = mixed();
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let mut out = String::new();
        write_timeline(&mut out, &result, Some(start)).unwrap();
        assert!(out.lines().nth(1).unwrap().contains("09:00:00"));
    }

    #[test]
    fn test_summary_and_rollups_render() {
        let result = mixed();
        let mut out = String::new();
        write_summary(&mut out, &result.summary).unwrap();
        write_fleet(&mut out, &build_fleet_assignment(&result.events, 3)).unwrap();
        write_route_details(&mut out, &route_details(&result.events, FleetMode::TruckDrone))
            .unwrap();
        write_vehicle_details(
            &mut out,
            &vehicle_details(&result.events, FleetMode::TruckDrone, 3),
        )
        .unwrap();
        assert!(out.contains("deliveries  3 (1 truck, 2 drone)"));
        assert!(out.contains("Drone 3"));
        assert!(out.contains("idle"));
        assert!(out.contains("Sortie 2"));
    }

    #[test]
    fn test_empty_schedule_rows() {
        let mut out = String::new();
        write_schedule(&mut out, &empty_schedule(FleetMode::DronesOnly, 2)).unwrap();
        assert!(out.starts_with("Schedule (horizon 1:00:00)"));
        assert_eq!(out.matches("(no stops)").count(), 2);

        let mut out = String::new();
        write_schedule(&mut out, &build_schedule(&mixed(), FleetMode::TruckOnly, 2)).unwrap();
        assert!(out.contains("Truck"));
        assert!(!out.contains("Drone 1"));
    }
}
