//! Synthetic truck-and-drone missions for demos and testing.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tandem_core::spatial::offset_by_bearing;
use tandem_core::{distance, Coordinate, Site, SiteKind};

/// Spacing between samples of the densified truck polyline, in meters.
const SAMPLE_SPACING_M: f64 = 100.0;

/// A named mission: truck polyline, drone excursions and the sites they serve.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub route: Vec<Coordinate>,
    pub excursions: Vec<Vec<Coordinate>>,
    pub sites: Vec<Site>,
}

/// Sample straight lines between `waypoints` every `spacing_m` meters.
///
/// Every waypoint appears verbatim in the output so site and sortie
/// coordinates placed on waypoints match exactly.
pub fn densify(waypoints: &[Coordinate], spacing_m: f64) -> Vec<Coordinate> {
    let mut samples = Vec::new();
    for pair in waypoints.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let steps = (distance(a, b) / spacing_m).ceil().max(1.0) as usize;
        samples.extend((0..steps).map(|i| lerp(a, b, i as f64 / steps as f64)));
    }
    samples.extend(waypoints.last().copied());
    samples
}

fn lerp(a: Coordinate, b: Coordinate, t: f64) -> Coordinate {
    Coordinate::new(a.lat + (b.lat - a.lat) * t, a.lng + (b.lng - a.lng) * t)
}

fn depot_site(at: Coordinate) -> Site {
    Site::new("depot", SiteKind::Depot, at.lat, at.lng).with_label("Depot")
}

fn order_site(number: usize, at: Coordinate) -> Site {
    Site::new(format!("order-{number}"), SiteKind::Order, at.lat, at.lng)
        .with_label(format!("Customer {number}"))
}

/// Truck drives out to a single customer and straight back.
pub fn create_round_trip_scenario(center_lat: f64, center_lon: f64) -> Scenario {
    let depot = Coordinate::new(center_lat, center_lon);
    let customer = offset_by_bearing(depot, 1500.0, 90.0_f64.to_radians());

    Scenario {
        name: "round-trip".to_string(),
        route: densify(&[depot, customer, depot], SAMPLE_SPACING_M),
        excursions: Vec::new(),
        sites: vec![depot_site(depot), order_site(1, customer)],
    }
}

/// Truck stays parked at the depot while one drone serves a customer.
pub fn create_single_excursion_scenario(center_lat: f64, center_lon: f64) -> Scenario {
    let depot = Coordinate::new(center_lat, center_lon);
    let customer = offset_by_bearing(depot, 800.0, 0.0_f64.to_radians());

    Scenario {
        name: "single-excursion".to_string(),
        route: vec![depot],
        excursions: vec![vec![depot, customer, depot]],
        sites: vec![depot_site(depot), order_site(1, customer)],
    }
}

/// Loop with a truck delivery, a charging stop and two drone sorties.
///
/// - Sortie 1 launches at the first waypoint and lands at the second
/// - The truck serves customer 1 itself, then charges
/// - Sortie 2 launches just after the charger and lands on the way home
pub fn create_mixed_scenario(center_lat: f64, center_lon: f64) -> Scenario {
    let depot = Coordinate::new(center_lat, center_lon);
    let east = 90.0_f64.to_radians();
    let north = 0.0_f64.to_radians();

    let launch_1 = offset_by_bearing(depot, 1000.0, east);
    let recover_1 = offset_by_bearing(depot, 2000.0, east);
    let truck_customer = offset_by_bearing(recover_1, 600.0, north);
    let charger = offset_by_bearing(recover_1, 1200.0, north);
    let recover_2 = offset_by_bearing(depot, 1000.0, north);
    let launch_2 = lerp(charger, recover_2, 0.3);

    let drone_customer_1 = offset_by_bearing(launch_1, 800.0, 30.0_f64.to_radians());
    let drone_customer_2 = offset_by_bearing(launch_2, 900.0, 330.0_f64.to_radians());

    let route = densify(
        &[
            depot,
            launch_1,
            recover_1,
            truck_customer,
            charger,
            launch_2,
            recover_2,
            depot,
        ],
        SAMPLE_SPACING_M,
    );

    Scenario {
        name: "mixed".to_string(),
        route,
        excursions: vec![
            vec![launch_1, drone_customer_1, recover_1],
            vec![launch_2, drone_customer_2, recover_2],
        ],
        sites: vec![
            depot_site(depot),
            order_site(1, truck_customer),
            order_site(2, drone_customer_1),
            order_site(3, drone_customer_2),
            Site::new("station-1", SiteKind::Station, charger.lat, charger.lng)
                .with_label("Charging Station"),
        ],
    }
}

/// Reproducible random mission with `orders` customers around the center.
///
/// Customers are visited in bearing order. Each one is either served by the
/// truck or, with probability `drone_share`, by a drone launched halfway to
/// the customer and recovered a little further along the same leg.
pub fn create_random_scenario(
    center_lat: f64,
    center_lon: f64,
    orders: usize,
    drone_share: f64,
    seed: u64,
) -> Scenario {
    let mut rng = StdRng::seed_from_u64(seed);
    let depot = Coordinate::new(center_lat, center_lon);

    let mut customers: Vec<(f64, Coordinate)> = (0..orders)
        .map(|_| {
            let bearing = rng.random_range(0.0..std::f64::consts::TAU);
            let range_m = rng.random_range(500.0..3000.0);
            (bearing, offset_by_bearing(depot, range_m, bearing))
        })
        .collect();
    customers.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut sites = vec![depot_site(depot)];
    let mut waypoints = vec![depot];
    let mut excursions = Vec::new();
    let share = drone_share.clamp(0.0, 1.0);

    for (i, &(_, customer)) in customers.iter().enumerate() {
        sites.push(order_site(i + 1, customer));
        let here = *waypoints.last().unwrap_or(&depot);

        if rng.random_bool(share) {
            let launch = lerp(here, customer, 0.5);
            let recover = lerp(here, customer, 0.8);
            waypoints.push(launch);
            waypoints.push(recover);
            excursions.push(vec![launch, customer, recover]);
        } else {
            waypoints.push(customer);
        }

        if i + 1 == orders / 2 {
            let bearing = rng.random_range(0.0..std::f64::consts::TAU);
            let charger = offset_by_bearing(customer, 300.0, bearing);
            sites.push(
                Site::new("station-1", SiteKind::Station, charger.lat, charger.lng)
                    .with_label("Charging Station"),
            );
            waypoints.push(charger);
        }
    }
    waypoints.push(depot);

    Scenario {
        name: format!("random-{seed}"),
        route: densify(&waypoints, SAMPLE_SPACING_M),
        excursions,
        sites,
    }
}
