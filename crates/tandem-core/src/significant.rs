//! Extraction of significant points along the truck route.
//!
//! The truck polyline is a dense sequence of path samples. Only a handful of
//! them matter for the timeline: the depot, truck-served orders, charging
//! stops and the places where a drone is launched or recovered.

use crate::config::DEPOT_RETURN_RADIUS_M;
use crate::matching::{match_site, CoordinateSet};
use crate::models::{Coordinate, Site, SiteKind, Sortie};
use crate::spatial::distance;
use std::collections::HashSet;

/// What happens at a significant point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PointTag {
    Depot,
    Order,
    Station,
    DroneLaunch,
    DroneRecover,
}

/// A tagged route sample. Only lives between extraction and event synthesis.
#[derive(Debug, Clone)]
pub(crate) struct SignificantPoint<'a> {
    /// Index into the truck route
    pub index: usize,
    pub point: Coordinate,
    pub tag: PointTag,
    /// Site found at this point (order, station or depot)
    pub site: Option<&'a Site>,
    pub sortie_number: Option<u32>,
    /// Order served by the launched or recovered drone
    pub served_order: Option<&'a Site>,
}

impl<'a> SignificantPoint<'a> {
    fn new(index: usize, point: Coordinate, tag: PointTag) -> Self {
        Self {
            index,
            point,
            tag,
            site: None,
            sortie_number: None,
            served_order: None,
        }
    }

    fn with_site(mut self, site: Option<&'a Site>) -> Self {
        self.site = site;
        self
    }

    fn with_sortie(mut self, sortie: &Sortie, sites: &'a [Site]) -> Self {
        self.sortie_number = Some(sortie.number);
        self.served_order = match_site(sortie.delivery, sites, Some(SiteKind::Order));
        self
    }

    /// Name of the site relevant to this stop, if any.
    pub fn display_name(&self) -> Option<&'a str> {
        match self.tag {
            PointTag::DroneLaunch | PointTag::DroneRecover => {
                self.served_order.and_then(|site| site.label.as_deref())
            }
            _ => self.site.and_then(|site| site.label.as_deref()),
        }
    }
}

/// Coordinates used by the sorties, one set per role.
struct SortieSets {
    launches: CoordinateSet,
    deliveries: CoordinateSet,
    recoveries: CoordinateSet,
}

impl SortieSets {
    fn new(sorties: &[Sortie]) -> Self {
        Self {
            launches: CoordinateSet::from_points(sorties.iter().map(|s| s.launch)),
            deliveries: CoordinateSet::from_points(sorties.iter().map(|s| s.delivery)),
            recoveries: CoordinateSet::from_points(sorties.iter().map(|s| s.recovery)),
        }
    }
}

/// Tracks which sortie roles and orders have already been bound to a point.
#[derive(Default)]
struct MatchState<'a> {
    launches: HashSet<u32>,
    recoveries: HashSet<u32>,
    orders: HashSet<&'a str>,
}

/// Scan `route` for significant points, returned in ascending route index.
///
/// `depot` is the reference location for detecting a final return; sorties
/// must already be validated.
pub(crate) fn extract_significant_points<'a>(
    route: &[Coordinate],
    sorties: &[Sortie],
    sites: &'a [Site],
    depot: Coordinate,
) -> Vec<SignificantPoint<'a>> {
    let Some(&start) = route.first() else {
        return Vec::new();
    };

    let sets = SortieSets::new(sorties);
    let mut state = MatchState::default();
    let mut points = vec![SignificantPoint::new(0, start, PointTag::Depot)
        .with_site(match_site(start, sites, Some(SiteKind::Depot)))];

    for (index, &point) in route.iter().enumerate().skip(1) {
        if let Some(found) = classify(index, point, sorties, sites, &sets, &mut state) {
            tracing::trace!(index, tag = ?found.tag, "significant point");
            points.push(found);
        }
    }

    reconcile_missed_orders(route, sites, &sets, &state, &mut points);

    points.sort_by_key(|p| p.index);

    let last_index = route.len() - 1;
    let last_point = route[last_index];
    let already_last = points.last().is_some_and(|p| p.index == last_index);
    if !already_last {
        let depot_site = match_site(last_point, sites, Some(SiteKind::Depot));
        if depot_site.is_some() || distance(last_point, depot) < DEPOT_RETURN_RADIUS_M {
            points.push(
                SignificantPoint::new(last_index, last_point, PointTag::Depot)
                    .with_site(depot_site),
            );
        }
    }

    points
}

/// Classify a single route sample, first rule wins.
fn classify<'a>(
    index: usize,
    point: Coordinate,
    sorties: &[Sortie],
    sites: &'a [Site],
    sets: &SortieSets,
    state: &mut MatchState<'a>,
) -> Option<SignificantPoint<'a>> {
    if sets.launches.matches(point) {
        if let Some(sortie) = first_unmatched(sorties, &state.launches, |s| s.launch, point) {
            state.launches.insert(sortie.number);
            return Some(
                SignificantPoint::new(index, point, PointTag::DroneLaunch)
                    .with_sortie(sortie, sites),
            );
        }
    }

    if sets.recoveries.matches(point) {
        if let Some(sortie) = first_unmatched(sorties, &state.recoveries, |s| s.recovery, point) {
            state.recoveries.insert(sortie.number);
            return Some(
                SignificantPoint::new(index, point, PointTag::DroneRecover)
                    .with_sortie(sortie, sites),
            );
        }
    }

    if let Some(order) = match_site(point, sites, Some(SiteKind::Order)) {
        let drone_served = sets.deliveries.matches(order.coordinate());
        // One delivery per order site, even when several consecutive samples
        // fall within tolerance of it.
        if !drone_served && state.orders.insert(order.id.as_str()) {
            return Some(
                SignificantPoint::new(index, point, PointTag::Order).with_site(Some(order)),
            );
        }
    }

    if let Some(station) = match_site(point, sites, Some(SiteKind::Station)) {
        return Some(
            SignificantPoint::new(index, point, PointTag::Station).with_site(Some(station)),
        );
    }

    match_site(point, sites, Some(SiteKind::Depot)).map(|depot| {
        SignificantPoint::new(index, point, PointTag::Depot).with_site(Some(depot))
    })
}

/// Lowest-numbered sortie whose `role` coordinate matches `point` and has not
/// been bound yet.
fn first_unmatched<'s>(
    sorties: &'s [Sortie],
    matched: &HashSet<u32>,
    role: impl Fn(&Sortie) -> Coordinate,
    point: Coordinate,
) -> Option<&'s Sortie> {
    sorties.iter().find(|sortie| {
        !matched.contains(&sortie.number)
            && role(sortie).approx_eq(&point, crate::config::MATCH_TOLERANCE_DEG)
    })
}

/// Inject truck-served orders the scan missed at their nearest route sample.
///
/// Road-snapped routes rarely pass exactly through an order's coordinate.
fn reconcile_missed_orders<'a>(
    route: &[Coordinate],
    sites: &'a [Site],
    sets: &SortieSets,
    state: &MatchState<'a>,
    points: &mut Vec<SignificantPoint<'a>>,
) {
    let missed = sites.iter().filter(|site| {
        site.kind == SiteKind::Order
            && !sets.deliveries.matches(site.coordinate())
            && !state.orders.contains(site.id.as_str())
    });

    for order in missed {
        let target = order.coordinate();
        let nearest = route
            .iter()
            .enumerate()
            .skip(1)
            .fold(None, |best: Option<(usize, f64)>, (index, &point)| {
                let d = distance(point, target);
                match best {
                    Some((_, best_d)) if best_d <= d => best,
                    _ => Some((index, d)),
                }
            });

        let Some((index, offset_m)) = nearest else {
            continue;
        };
        tracing::debug!(
            order = %order.id,
            index,
            offset_m,
            "order not on route, attaching to nearest sample"
        );
        points.push(
            SignificantPoint::new(index, route[index], PointTag::Order).with_site(Some(order)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng)
    }

    fn tags(points: &[SignificantPoint<'_>]) -> Vec<(usize, PointTag)> {
        points.iter().map(|p| (p.index, p.tag)).collect()
    }

    #[test]
    fn empty_route_has_no_points() {
        assert!(extract_significant_points(&[], &[], &[], c(0.0, 0.0)).is_empty());
    }

    #[test]
    fn first_point_is_depot_and_return_is_detected() {
        let route = vec![c(0.0, 0.0), c(0.0, 0.01), c(0.0, 0.0)];
        let points = extract_significant_points(&route, &[], &[], c(0.0, 0.0));
        assert_eq!(tags(&points), vec![(0, PointTag::Depot), (2, PointTag::Depot)]);
    }

    #[test]
    fn final_point_far_from_depot_is_not_a_return() {
        let route = vec![c(0.0, 0.0), c(0.0, 0.01), c(0.0, 0.02)];
        let points = extract_significant_points(&route, &[], &[], c(0.0, 0.0));
        assert_eq!(tags(&points), vec![(0, PointTag::Depot)]);
    }

    #[test]
    fn shared_launch_point_binds_lowest_sortie_first() {
        let launch = c(0.0, 0.01);
        let sorties = vec![
            Sortie::from_points(1, &[launch, c(0.01, 0.01), c(0.0, 0.02)]).unwrap(),
            Sortie::from_points(2, &[launch, c(-0.01, 0.01), c(0.0, 0.02)]).unwrap(),
        ];
        let route = vec![c(0.0, 0.0), launch, launch, c(0.0, 0.02), c(0.0, 0.02)];
        let points = extract_significant_points(&route, &sorties, &[], c(0.0, 0.0));

        let launches: Vec<_> = points
            .iter()
            .filter(|p| p.tag == PointTag::DroneLaunch)
            .map(|p| (p.index, p.sortie_number))
            .collect();
        assert_eq!(launches, vec![(1, Some(1)), (2, Some(2))]);

        let recoveries: Vec<_> = points
            .iter()
            .filter(|p| p.tag == PointTag::DroneRecover)
            .map(|p| (p.index, p.sortie_number))
            .collect();
        assert_eq!(recoveries, vec![(3, Some(1)), (4, Some(2))]);
    }

    #[test]
    fn drone_served_order_is_not_a_truck_delivery() {
        let order = c(0.0, 0.01);
        let sites = vec![
            Site::new("depot", SiteKind::Depot, 0.0, 0.0),
            Site::new("o1", SiteKind::Order, order.lat, order.lng),
        ];
        let sorties = vec![Sortie::from_points(1, &[c(0.0, 0.0), order, c(0.0, 0.0)]).unwrap()];
        let route = vec![c(0.0, 0.0), order, c(0.0, 0.02)];
        let points = extract_significant_points(&route, &sorties, &sites, c(0.0, 0.0));
        assert!(points.iter().all(|p| p.tag != PointTag::Order));
    }

    #[test]
    fn charging_station_and_mid_route_depot() {
        let sites = vec![
            Site::new("depot", SiteKind::Depot, 0.0, 0.0),
            Site::new("s1", SiteKind::Station, 0.0, 0.01).with_label("North charger"),
        ];
        let route = vec![c(0.0, 0.0), c(0.0, 0.01), c(0.0, 0.0), c(0.0, 0.02)];
        let points = extract_significant_points(&route, &[], &sites, c(0.0, 0.0));
        assert_eq!(
            tags(&points),
            vec![(0, PointTag::Depot), (1, PointTag::Station), (2, PointTag::Depot)]
        );
        assert_eq!(points[1].display_name(), Some("North charger"));
    }

    #[test]
    fn missed_order_attaches_to_nearest_sample() {
        let sites = vec![Site::new("o1", SiteKind::Order, 0.0005, 0.0101).with_label("Bob")];
        let route = vec![c(0.0, 0.0), c(0.0, 0.005), c(0.0, 0.01), c(0.0, 0.015)];
        let points = extract_significant_points(&route, &[], &sites, c(0.0, 0.0));
        assert_eq!(tags(&points), vec![(0, PointTag::Depot), (2, PointTag::Order)]);
        assert_eq!(points[1].display_name(), Some("Bob"));
    }

    #[test]
    fn order_is_captured_once() {
        let sites = vec![Site::new("o1", SiteKind::Order, 0.0, 0.01)];
        let route = vec![c(0.0, 0.0), c(0.0, 0.01), c(0.0, 0.01), c(0.0, 0.02)];
        let points = extract_significant_points(&route, &[], &sites, c(0.0, 0.0));
        let orders = points.iter().filter(|p| p.tag == PointTag::Order).count();
        assert_eq!(orders, 1);
    }

    #[test]
    fn single_point_route_only_has_depot() {
        let sites = vec![Site::new("o1", SiteKind::Order, 0.0, 0.01)];
        let points = extract_significant_points(&[c(0.0, 0.0)], &[], &sites, c(0.0, 0.0));
        assert_eq!(tags(&points), vec![(0, PointTag::Depot)]);
    }
}
