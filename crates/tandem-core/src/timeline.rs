//! Event synthesis and the global timeline merge.
//!
//! Truck and drone events are first timed independently, each against its
//! own provisional clock. [`merge_events`] then interleaves both lists by
//! provisional time and re-stamps every event with a single shared clock.

use crate::config::{TimelineConfig, MIN_TRAVEL_SEGMENT_M};
use crate::matching::match_site;
use crate::models::{
    Coordinate, EventKind, Site, SiteKind, Sortie, TimelineEvent, TimelineResult,
};
use crate::significant::{extract_significant_points, PointTag, SignificantPoint};
use crate::spatial::{distance, path_distance, travel_time_secs};
use crate::summary::summarize;

/// Sequential `event-N` identifiers, unique within one timeline.
#[derive(Debug, Default)]
pub struct EventIds {
    issued: u32,
}

impl EventIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> String {
        self.issued += 1;
        format!("event-{}", self.issued)
    }
}

/// Build the complete mission timeline.
///
/// `excursions` holds raw drone round trips; entries without exactly three
/// points are skipped. An empty truck route yields an empty timeline. The
/// depot is the first depot-kind site, or the route start if there is none.
///
/// Same inputs always produce the same events, ids and timestamps.
pub fn generate_timeline(
    truck_route: &[Coordinate],
    excursions: &[Vec<Coordinate>],
    sites: &[Site],
    config: &TimelineConfig,
) -> TimelineResult {
    let Some(&start) = truck_route.first() else {
        return TimelineResult::empty();
    };
    let depot = sites
        .iter()
        .find(|site| site.kind == SiteKind::Depot)
        .map(Site::coordinate)
        .unwrap_or(start);

    let sorties = Sortie::parse_all(excursions);
    let points = extract_significant_points(truck_route, &sorties, sites, depot);

    let mut ids = EventIds::new();
    let truck = truck_events(truck_route, &points, config, &mut ids);
    let drone = drone_events(&sorties, sites, config, &mut ids);
    let events = merge_events(truck, drone);
    let summary = summarize(&events);

    tracing::debug!(
        route_points = truck_route.len(),
        sorties = sorties.len(),
        significant_points = points.len(),
        events = events.len(),
        total_duration_secs = summary.total_duration_secs,
        "generated timeline"
    );

    TimelineResult { events, summary }
}

/// Launch, delivery and return events for every sortie, in input order.
///
/// Each sortie is timed from zero on its own provisional clock.
pub fn drone_events(
    sorties: &[Sortie],
    sites: &[Site],
    config: &TimelineConfig,
    ids: &mut EventIds,
) -> Vec<TimelineEvent> {
    let mut events = Vec::with_capacity(sorties.len() * 3);

    for sortie in sorties {
        let number = sortie.number;
        let order = match_site(sortie.delivery, sites, Some(SiteKind::Order));
        let order_label = order.and_then(|site| site.label.clone());
        let mut clock = 0.0;

        let mut launch = TimelineEvent::new(
            ids.next_id(),
            EventKind::DroneLaunch,
            sortie.launch,
            format!("Sortie {number}: Drone Launch"),
        );
        launch.sortie_number = Some(number);
        launch.description = Some(format!(
            "Launching for {}",
            order_label.as_deref().unwrap_or("order")
        ));
        launch.duration_secs = config.drone_load_time_secs;
        launch.cumulative_secs = clock;
        clock += launch.duration_secs;
        events.push(launch);

        let outbound_m = distance(sortie.launch, sortie.delivery);
        let mut delivery = TimelineEvent::new(
            ids.next_id(),
            EventKind::DroneDelivery,
            sortie.delivery,
            format!("Sortie {number}: Drone Delivery"),
        );
        delivery.sortie_number = Some(number);
        delivery.served_site = order_label.clone();
        delivery.served_site_id = order.map(|site| site.id.clone());
        delivery.duration_secs =
            travel_time_secs(outbound_m, config.drone_speed_kmh) + config.drone_unload_time_secs;
        delivery.cumulative_secs = clock;
        delivery.distance_m = outbound_m;
        clock += delivery.duration_secs;
        events.push(delivery);

        let inbound_m = distance(sortie.delivery, sortie.recovery);
        let mut back = TimelineEvent::new(
            ids.next_id(),
            EventKind::DroneReturn,
            sortie.recovery,
            format!("Sortie {number}: Drone Return"),
        );
        back.sortie_number = Some(number);
        back.duration_secs = travel_time_secs(inbound_m, config.drone_speed_kmh);
        back.cumulative_secs = clock;
        back.distance_m = inbound_m;
        events.push(back);
    }

    events
}

/// Departure, travel and stop events for the truck.
///
/// Travel between consecutive significant points is aggregated into one
/// event, omitted when the segment is no longer than
/// [`MIN_TRAVEL_SEGMENT_M`].
pub(crate) fn truck_events(
    route: &[Coordinate],
    points: &[SignificantPoint<'_>],
    config: &TimelineConfig,
    ids: &mut EventIds,
) -> Vec<TimelineEvent> {
    let Some(first) = points.first() else {
        return Vec::new();
    };

    let mut depart = TimelineEvent::new(
        ids.next_id(),
        EventKind::TruckDepart,
        first.point,
        "Truck Departs Depot",
    );
    depart.waypoint_index = Some(first.index);
    let mut events = vec![depart];
    let mut clock = 0.0;
    let last = points.len() - 1;

    for (position, pair) in points.windows(2).enumerate() {
        let (prev, curr) = (&pair[0], &pair[1]);
        let is_last = position + 1 == last;

        let segment_m = path_distance(route, prev.index, curr.index);
        if segment_m > MIN_TRAVEL_SEGMENT_M {
            let mut travel = TimelineEvent::new(
                ids.next_id(),
                EventKind::TruckTravel,
                curr.point,
                format!("Travel to {}", destination_label(curr)),
            );
            travel.waypoint_index = Some(curr.index);
            travel.duration_secs = travel_time_secs(segment_m, config.truck_speed_kmh);
            travel.cumulative_secs = clock;
            travel.distance_m = segment_m;
            clock += travel.duration_secs;
            events.push(travel);
        }

        if let Some(mut stop) = stop_event(curr, is_last, config, ids) {
            stop.waypoint_index = Some(curr.index);
            stop.cumulative_secs = clock;
            clock += stop.duration_secs;
            events.push(stop);
        }
    }

    events
}

/// Action taken by the truck on arriving at `point`.
fn stop_event(
    point: &SignificantPoint<'_>,
    is_last: bool,
    config: &TimelineConfig,
    ids: &mut EventIds,
) -> Option<TimelineEvent> {
    let name = point.display_name();
    let event = match point.tag {
        PointTag::Order => {
            let mut event = TimelineEvent::new(
                ids.next_id(),
                EventKind::TruckDelivery,
                point.point,
                "Truck Delivery",
            );
            event.served_site = name.map(str::to_owned);
            event.served_site_id = point.site.map(|site| site.id.clone());
            event.description = Some(format!("Delivering to {}", name.unwrap_or("order")));
            event.duration_secs = config.truck_delivery_time_secs;
            event
        }
        PointTag::DroneLaunch | PointTag::DroneRecover => {
            let (kind, label, description) = if point.tag == PointTag::DroneLaunch {
                (
                    EventKind::TruckDroneLaunch,
                    format!("Launch Drone → {}", name.unwrap_or("Delivery")),
                    format!("Truck stops to launch drone for {}", name.unwrap_or("delivery")),
                )
            } else {
                (
                    EventKind::TruckDroneRecover,
                    format!("Recover Drone ← {}", name.unwrap_or("Delivery")),
                    format!(
                        "Truck stops to recover drone after {}",
                        name.unwrap_or("delivery")
                    ),
                )
            };
            let mut event = TimelineEvent::new(ids.next_id(), kind, point.point, label);
            event.sortie_number = point.sortie_number;
            event.served_site = name.map(str::to_owned);
            event.served_site_id = point.served_order.map(|site| site.id.clone());
            event.description = Some(description);
            event.duration_secs = config.drone_load_time_secs;
            event
        }
        PointTag::Station => {
            let mut event = TimelineEvent::new(
                ids.next_id(),
                EventKind::TruckCharging,
                point.point,
                "Charging Stop",
            );
            event.description = Some(name.unwrap_or("Charging station").to_owned());
            event.duration_secs = config.charging_time_secs;
            event
        }
        // Mid-route depot visits only contribute their travel segment.
        PointTag::Depot if !is_last => return None,
        PointTag::Depot => {
            let mut event = TimelineEvent::new(
                ids.next_id(),
                EventKind::TruckReturn,
                point.point,
                "Truck Returns to Depot",
            );
            event.description = Some("Mission complete".to_owned());
            event
        }
    };
    Some(event)
}

fn destination_label(point: &SignificantPoint<'_>) -> String {
    let name = point.display_name();
    match point.tag {
        PointTag::Order => name.unwrap_or("Order").to_owned(),
        PointTag::DroneLaunch => match (name, point.sortie_number) {
            (Some(name), _) => format!("Launch → {name}"),
            (None, Some(number)) => format!("Launch Point #{number}"),
            (None, None) => "Launch Point".to_owned(),
        },
        PointTag::DroneRecover => match (name, point.sortie_number) {
            (Some(name), _) => format!("Recover ← {name}"),
            (None, Some(number)) => format!("Recovery Point #{number}"),
            (None, None) => "Recovery Point".to_owned(),
        },
        PointTag::Station => name.unwrap_or("Charging Station").to_owned(),
        PointTag::Depot => "Depot".to_owned(),
    }
}

/// Interleave truck and drone events on one global clock.
///
/// Events are stably sorted by their provisional per-vehicle time (truck
/// events first on ties), then every `cumulative_secs` is overwritten with a
/// running total of durations in that order. After this the clock is
/// gap-free: each event starts exactly when the previous one ends.
pub fn merge_events(truck: Vec<TimelineEvent>, drone: Vec<TimelineEvent>) -> Vec<TimelineEvent> {
    let mut events = truck;
    events.extend(drone);
    events.sort_by(|a, b| a.cumulative_secs.total_cmp(&b.cumulative_secs));

    let mut clock = 0.0;
    for event in &mut events {
        event.cumulative_secs = clock;
        clock += event.duration_secs;
    }
    events
}
