//! Great-circle distance and travel-time estimation.

use crate::domain::GeoPoint;

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Average-speed heuristic: minutes of travel per mile.
pub const MINUTES_PER_MILE: f64 = 3.2;

/// Travel-time floor in minutes, however close the facility is.
pub const MIN_TRAVEL_MINUTES: u32 = 4;

/// Distance and travel time between a query point and a facility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelEstimate {
    pub distance_miles: f64,
    pub travel_time_minutes: u32,
}

/// Haversine distance in miles between two raw coordinate pairs.
///
/// Performs no validation; callers holding unchecked input should build
/// [`GeoPoint`]s and use [`haversine_miles`] instead.
pub fn haversine_miles_raw(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Haversine distance in miles between two points.
pub fn haversine_miles(from: GeoPoint, to: GeoPoint) -> f64 {
    haversine_miles_raw(from.lat(), from.lng(), to.lat(), to.lng())
}

/// Travel time in whole minutes for a distance, never below the floor.
pub fn travel_time_minutes(distance_miles: f64) -> u32 {
    let mins = (distance_miles * MINUTES_PER_MILE).round();
    // Float-to-int casts saturate, so NaN and negatives land on 0.
    (mins as u32).max(MIN_TRAVEL_MINUTES)
}

/// Distance and derived travel time from `from` to `to`.
pub fn estimate(from: GeoPoint, to: GeoPoint) -> TravelEstimate {
    let distance_miles = haversine_miles(from, to);
    TravelEstimate {
        distance_miles,
        travel_time_minutes: travel_time_minutes(distance_miles),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    #[test]
    fn san_francisco_points_about_a_mile_apart() {
        let a = point(37.7749, -122.4194);
        let b = point(37.7858, -122.4064);

        let est = estimate(a, b);
        assert!((est.distance_miles - 1.0).abs() < 0.2, "{}", est.distance_miles);
        assert!((est.distance_miles - 1.03498).abs() < 1e-4);

        let expected = ((est.distance_miles * 3.2).round() as u32).max(4);
        assert_eq!(est.travel_time_minutes, expected);
        assert_eq!(est.travel_time_minutes, 4);
    }

    #[test]
    fn same_point_is_zero() {
        let a = point(51.5074, -0.1278);
        assert!(haversine_miles(a, a) < 1e-9);
        assert_eq!(estimate(a, a).travel_time_minutes, MIN_TRAVEL_MINUTES);
    }

    #[test]
    fn raw_matches_typed() {
        let a = point(37.7749, -122.4194);
        let b = point(37.7596, -122.3921);
        assert_eq!(
            haversine_miles(a, b),
            haversine_miles_raw(37.7749, -122.4194, 37.7596, -122.3921)
        );
    }

    #[test]
    fn antipodes_are_half_circumference() {
        let d = haversine_miles(point(0.0, 0.0), point(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_MILES).abs() < 1e-6);
    }

    #[test]
    fn travel_time_rounds_and_floors() {
        assert_eq!(travel_time_minutes(0.0), 4);
        assert_eq!(travel_time_minutes(1.0), 4); // 3.2 -> 3 -> floor 4
        assert_eq!(travel_time_minutes(1.8278), 6); // 5.85 -> 6
        assert_eq!(travel_time_minutes(10.0), 32);
        assert_eq!(travel_time_minutes(f64::NAN), 4);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn point_strategy() -> impl Strategy<Value = GeoPoint> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| GeoPoint::new(lat, lng).unwrap())
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(a in point_strategy(), b in point_strategy()) {
            let ab = haversine_miles(a, b);
            let ba = haversine_miles(b, a);
            prop_assert!((ab - ba).abs() < 1e-6, "d(A,B)={} d(B,A)={}", ab, ba);
        }

        #[test]
        fn distance_to_self_is_zero(a in point_strategy()) {
            prop_assert!(haversine_miles(a, a) < 1e-6);
        }

        #[test]
        fn distance_is_bounded(a in point_strategy(), b in point_strategy()) {
            let d = haversine_miles(a, b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_MILES + 1e-6);
        }

        #[test]
        fn travel_time_never_below_floor(miles in 0.0f64..5000.0) {
            prop_assert!(travel_time_minutes(miles) >= MIN_TRAVEL_MINUTES);
        }
    }
}
