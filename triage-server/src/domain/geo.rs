//! Geographic coordinate types.

use std::fmt;

/// Error returned when constructing a point from invalid coordinates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinates: {reason}")]
pub struct InvalidGeoPoint {
    reason: &'static str,
}

/// A latitude/longitude pair in decimal degrees.
///
/// Latitude is always within [-90, 90] and longitude within [-180, 180].
/// Any `GeoPoint` value is valid by construction.
///
/// # Examples
///
/// ```
/// use triage_server::domain::GeoPoint;
///
/// let sf = GeoPoint::new(37.7749, -122.4194).unwrap();
/// assert_eq!(sf.lat(), 37.7749);
///
/// // Out of range is rejected
/// assert!(GeoPoint::new(91.0, 0.0).is_err());
/// assert!(GeoPoint::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

impl GeoPoint {
    /// Create a point from latitude and longitude in degrees.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidGeoPoint> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(InvalidGeoPoint {
                reason: "latitude and longitude must be finite numbers",
            });
        }

        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidGeoPoint {
                reason: "latitude must be within [-90, 90]",
            });
        }

        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidGeoPoint {
                reason: "longitude must be within [-180, 180]",
            });
        }

        Ok(Self { lat, lng })
    }

    /// Create a point from a GeoJSON-style `[lng, lat]` pair.
    pub fn from_lng_lat(coordinates: [f64; 2]) -> Result<Self, InvalidGeoPoint> {
        Self::new(coordinates[1], coordinates[0])
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl fmt::Debug for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeoPoint({}, {})", self.lat, self.lng)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4},{:.4}", self.lat, self.lng)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any in-range pair constructs and reads back unchanged
        #[test]
        fn in_range_roundtrip(lat in -90.0f64..=90.0, lng in -180.0f64..=180.0) {
            let p = GeoPoint::new(lat, lng).unwrap();
            prop_assert_eq!(p.lat(), lat);
            prop_assert_eq!(p.lng(), lng);
        }

        /// Latitudes beyond the poles are always rejected
        #[test]
        fn latitude_out_of_range_rejected(lat in 90.0001f64..1000.0, lng in -180.0f64..=180.0) {
            prop_assert!(GeoPoint::new(lat, lng).is_err());
            prop_assert!(GeoPoint::new(-lat, lng).is_err());
        }
    }
}
