//! Tolerance matching of route coordinates against sites and point sets.
//!
//! Matching is componentwise: two coordinates match when both latitude and
//! longitude differ by less than the tolerance. This is a box test rather
//! than a radial one, roughly 11 m at mid-latitudes for the default
//! [`MATCH_TOLERANCE_DEG`].

use crate::config::MATCH_TOLERANCE_DEG;
use crate::models::{Coordinate, Site, SiteKind};
use std::collections::HashMap;

/// First site within the default tolerance of `point`, optionally restricted
/// to one kind. Sites are scanned in input order.
pub fn match_site<'a>(
    point: Coordinate,
    sites: &'a [Site],
    kind: Option<SiteKind>,
) -> Option<&'a Site> {
    match_site_with_tolerance(point, sites, kind, MATCH_TOLERANCE_DEG)
}

/// [`match_site`] with an explicit tolerance in degrees.
pub fn match_site_with_tolerance<'a>(
    point: Coordinate,
    sites: &'a [Site],
    kind: Option<SiteKind>,
    tolerance_deg: f64,
) -> Option<&'a Site> {
    sites.iter().find(|site| {
        kind.map_or(true, |wanted| site.kind == wanted)
            && point.approx_eq(&site.coordinate(), tolerance_deg)
    })
}

/// Set of coordinates keyed by their `"lat,lng"` text form.
#[derive(Debug, Clone, Default)]
pub struct CoordinateSet {
    points: HashMap<String, Coordinate>,
}

impl CoordinateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: impl IntoIterator<Item = Coordinate>) -> Self {
        let mut set = Self::new();
        for point in points {
            set.insert(point);
        }
        set
    }

    pub fn insert(&mut self, point: Coordinate) {
        self.points.insert(point.key(), point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True if `point` hits a member exactly or within `tolerance_deg` on both axes.
    pub fn contains_approx(&self, point: Coordinate, tolerance_deg: f64) -> bool {
        if self.points.contains_key(&point.key()) {
            return true;
        }
        self.points
            .values()
            .any(|member| point.approx_eq(member, tolerance_deg))
    }

    /// [`Self::contains_approx`] at the default tolerance.
    pub fn matches(&self, point: Coordinate) -> bool {
        self.contains_approx(point, MATCH_TOLERANCE_DEG)
    }
}
