//! Nearby facility lookup.

use crate::domain::{Facility, GeoPoint};

use super::distance;

/// Annotate facilities with distance and travel time from `origin`, and
/// return the `limit` closest, nearest first.
///
/// Facilities at equal distance keep their registry order.
pub fn nearby_facilities<I>(facilities: I, origin: GeoPoint, limit: usize) -> Vec<Facility>
where
    I: IntoIterator<Item = Facility>,
{
    let mut annotated: Vec<Facility> = facilities
        .into_iter()
        .map(|mut facility| {
            let est = distance::estimate(origin, facility.position);
            facility.distance_miles = Some(est.distance_miles);
            facility.travel_time_minutes = Some(est.travel_time_minutes);
            facility
        })
        .collect();

    annotated.sort_by(|a, b| {
        let a = a.distance_miles.unwrap_or(f64::INFINITY);
        let b = b.distance_miles.unwrap_or(f64::INFINITY);
        a.total_cmp(&b)
    });
    annotated.truncate(limit);
    annotated
}
