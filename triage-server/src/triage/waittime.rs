//! Synthetic wait-time estimation.
//!
//! No live wait-time feed is integrated yet. Until one is, each facility
//! gets a deterministic pseudo-random wait seeded by its name and the current
//! hour of day: stable within an hour, varying between hours and between
//! facilities. The generator is a plain linear congruential step and is not
//! suitable for anything security-sensitive.

use chrono::{Local, Timelike};

use crate::domain::Facility;

/// Lower bound of the synthetic wait range (minutes).
pub const MIN_WAIT_MINUTES: u32 = 15;

/// Upper bound of the synthetic wait range (minutes).
pub const MAX_WAIT_MINUTES: u32 = 90;

const LCG_MULTIPLIER: u64 = 9301;
const LCG_INCREMENT: u64 = 49297;
const LCG_MODULUS: u64 = 233280;

/// A wait time and whether it was measured or estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitEstimate {
    pub minutes: u32,
    pub estimated: bool,
}

/// Trait for providing facility wait times.
///
/// This abstraction lets the recommendation pipeline run against the
/// synthetic estimator, a cached snapshot, or fixed data in tests.
pub trait WaitTimeSource {
    /// Wait time for the facility with the given name.
    fn wait_time(&self, name: &str) -> WaitEstimate;
}

/// Sum of the UTF-16 code units of a name.
fn name_seed(name: &str) -> u64 {
    name.encode_utf16().map(u64::from).sum()
}

/// Synthetic wait in minutes for a facility name at an hour of day (0-23).
///
/// Always within [`MIN_WAIT_MINUTES`, `MAX_WAIT_MINUTES`]. An empty name is
/// accepted and seeds from the hour alone.
pub fn synthetic_wait_minutes(name: &str, hour: u32) -> u32 {
    let seed = name_seed(name) + u64::from(hour);
    let rand = ((seed * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS) as f64 / LCG_MODULUS as f64;

    let span = f64::from(MAX_WAIT_MINUTES - MIN_WAIT_MINUTES);
    (f64::from(MIN_WAIT_MINUTES) + rand * span).round() as u32
}

/// The local wall-clock hour (0-23).
pub fn current_hour() -> u32 {
    Local::now().hour()
}

/// Synthetic wait times pinned to one hour of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticWaitTimes {
    hour: u32,
}

impl SyntheticWaitTimes {
    /// Estimator for a specific hour. Hours past 23 wrap.
    pub fn at_hour(hour: u32) -> Self {
        Self { hour: hour % 24 }
    }

    /// Estimator for the current local hour.
    pub fn now() -> Self {
        Self::at_hour(current_hour())
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }
}

impl WaitTimeSource for SyntheticWaitTimes {
    fn wait_time(&self, name: &str) -> WaitEstimate {
        WaitEstimate {
            minutes: synthetic_wait_minutes(name, self.hour),
            estimated: true,
        }
    }
}

/// Attach a wait time to every facility.
///
/// Returns the facilities in their original order. Never fails.
pub fn estimate_wait_times<S: WaitTimeSource + ?Sized>(
    facilities: Vec<Facility>,
    source: &S,
) -> Vec<Facility> {
    facilities
        .into_iter()
        .map(|mut facility| {
            let wait = source.wait_time(&facility.name);
            facility.wait_time_minutes = Some(wait.minutes);
            facility.wait_time_estimated = wait.estimated;
            facility
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FacilityId, GeoPoint};

    fn facility(name: &str) -> Facility {
        Facility::new(
            FacilityId::new(name),
            name,
            GeoPoint::new(37.7749, -122.4194).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn known_values() {
        // seed 65: (65*9301 + 49297) % 233280 = 187302 -> 15 + 0.8029*75
        assert_eq!(synthetic_wait_minutes("A", 0), 75);
        assert_eq!(synthetic_wait_minutes("A", 1), 78);
        assert_eq!(synthetic_wait_minutes("City General Hospital", 14), 86);
        assert_eq!(synthetic_wait_minutes("Riverside Medical Center", 14), 53);
    }

    #[test]
    fn empty_name_seeds_from_hour() {
        // seed 0: 49297 / 233280 = 0.2113 -> 30.85
        assert_eq!(synthetic_wait_minutes("", 0), 31);
        assert_eq!(synthetic_wait_minutes("", 5), synthetic_wait_minutes("\u{5}", 0));
    }

    #[test]
    fn seed_uses_utf16_code_units() {
        // U+00E9 is a single code unit of value 233
        assert_eq!(name_seed("é"), 233);
        assert_eq!(synthetic_wait_minutes("é", 0), 53);
        // U+1F3E5 is a surrogate pair
        assert_eq!(name_seed("\u{1F3E5}"), 0xD83C + 0xDFE5);
    }

    #[test]
    fn stable_within_an_hour() {
        let source = SyntheticWaitTimes::at_hour(9);
        let a = source.wait_time("Bayview Health Campus");
        let b = source.wait_time("Bayview Health Campus");
        assert_eq!(a, b);
        assert!(a.estimated);
    }

    #[test]
    fn hour_wraps() {
        assert_eq!(SyntheticWaitTimes::at_hour(25).hour(), 1);
    }

    #[test]
    fn estimate_attaches_flag_and_preserves_order() {
        let input = vec![facility("B"), facility("A"), facility("C")];
        let out = estimate_wait_times(input, &SyntheticWaitTimes::at_hour(0));

        let names: Vec<_> = out.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["B", "A", "C"]);
        assert_eq!(out[1].wait_time_minutes, Some(75));
        assert!(out.iter().all(|f| f.wait_time_estimated));
    }

    #[test]
    fn estimate_empty_list() {
        assert!(estimate_wait_times(Vec::new(), &SyntheticWaitTimes::at_hour(3)).is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn always_within_range(name in ".{0,40}", hour in 0u32..24) {
            let wait = synthetic_wait_minutes(&name, hour);
            prop_assert!((MIN_WAIT_MINUTES..=MAX_WAIT_MINUTES).contains(&wait));
        }

        #[test]
        fn deterministic_for_name_and_hour(name in "[A-Za-z .]{1,30}", hour in 0u32..24) {
            prop_assert_eq!(
                synthetic_wait_minutes(&name, hour),
                synthetic_wait_minutes(&name, hour)
            );
        }
    }
}
