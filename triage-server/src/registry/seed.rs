//! Built-in facilities used when no registry is configured.

use crate::domain::{Facility, FacilityId, GeoPoint};

/// (name, address, longitude, latitude, average wait)
const SEED: [(&str, &str, f64, f64, u32); 5] = [
    ("City General Hospital", "100 Main St", -122.4194, 37.7749, 32),
    ("Riverside Medical Center", "250 River Ave", -122.4064, 37.7858, 24),
    ("St. Mary Emergency Care", "80 Pine St", -122.4313, 37.7694, 41),
    ("Bayview Health Campus", "900 Bayview Rd", -122.3921, 37.7596, 28),
    ("Northside Trauma Hospital", "10 North Blvd", -122.4466, 37.7897, 36),
];

/// The built-in San Francisco facilities.
pub fn seed_facilities() -> Vec<Facility> {
    SEED.iter()
        .enumerate()
        .filter_map(|(i, (name, address, lng, lat, wait))| {
            let position = GeoPoint::from_lng_lat([*lng, *lat]).ok()?;
            let facility = Facility::new(FacilityId::new(format!("seed-{}", i + 1)), *name, position)
                .ok()?
                .with_address(*address)
                .with_average_wait(*wait);
            Some(facility)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_seed_entries_are_valid() {
        let facilities = seed_facilities();
        assert_eq!(facilities.len(), SEED.len());
    }

    #[test]
    fn seed_fields() {
        let facilities = seed_facilities();
        let riverside = &facilities[1];

        assert_eq!(riverside.id.as_str(), "seed-2");
        assert_eq!(riverside.name, "Riverside Medical Center");
        assert_eq!(riverside.address.as_deref(), Some("250 River Ave"));
        assert_eq!(riverside.position.lat(), 37.7858);
        assert_eq!(riverside.position.lng(), -122.4064);
        assert_eq!(riverside.average_wait_minutes, 24);
    }
}
