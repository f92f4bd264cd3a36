//! End-to-end recommendation: nearby lookup, wait times, ranking.

use tracing::debug;

use crate::domain::{Facility, GeoPoint, Severity};

use super::config::TriageConfig;
use super::nearby::nearby_facilities;
use super::rank::{Ranked, ScoreWeights, rank_with_weights};
use super::waittime::{WaitTimeSource, estimate_wait_times};

/// Request for a recommendation.
#[derive(Debug, Clone, Copy)]
pub struct RecommendRequest {
    /// Where the patient is.
    pub origin: GeoPoint,

    /// Assessed urgency.
    pub severity: Severity,
}

/// Ranked facilities for a request.
#[derive(Debug, Clone)]
pub struct Recommendation {
    /// Best facilities first.
    pub ranked: Vec<Ranked<Facility>>,

    /// Number of nearby facilities that were scored.
    pub considered: usize,
}

/// Produce a recommendation from registry facilities.
pub fn recommend<S: WaitTimeSource + ?Sized>(
    facilities: Vec<Facility>,
    request: &RecommendRequest,
    waits: &S,
    config: &TriageConfig,
) -> Recommendation {
    let nearby = nearby_facilities(facilities, request.origin, config.max_nearby);
    rank_nearby(nearby, request, waits, config)
}

/// Produce a recommendation from facilities already returned by
/// [`nearby_facilities`].
///
/// `waits` only needs to cover `nearby`.
pub fn rank_nearby<S: WaitTimeSource + ?Sized>(
    nearby: Vec<Facility>,
    request: &RecommendRequest,
    waits: &S,
    config: &TriageConfig,
) -> Recommendation {
    let considered = nearby.len();

    let with_waits = estimate_wait_times(nearby, waits);
    let weights = ScoreWeights::for_severity(request.severity);
    let ranked = rank_with_weights(with_waits, weights, config.max_ranked);

    debug!(
        origin = %request.origin,
        severity = request.severity.level(),
        considered,
        returned = ranked.len(),
        "ranked facilities"
    );

    Recommendation { ranked, considered }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::seed_facilities;
    use crate::triage::waittime::{SyntheticWaitTimes, WaitEstimate};

    /// Fixed waits by name, for tests.
    struct FixedWaits(Vec<(&'static str, u32)>);

    impl WaitTimeSource for FixedWaits {
        fn wait_time(&self, name: &str) -> WaitEstimate {
            let minutes = self
                .0
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, m)| *m)
                .unwrap_or(0);
            WaitEstimate {
                minutes,
                estimated: false,
            }
        }
    }

    fn request(severity: Severity) -> RecommendRequest {
        RecommendRequest {
            origin: GeoPoint::new(37.7749, -122.4194).unwrap(),
            severity,
        }
    }

    fn names(rec: &Recommendation) -> Vec<&str> {
        rec.ranked.iter().map(|r| r.item.name.as_str()).collect()
    }

    #[test]
    fn severe_at_ten_oclock() {
        // Waits at hour 10: City 74, Riverside 41, St. Mary 59, Bayview 59, Northside 73
        let rec = recommend(
            seed_facilities(),
            &request(Severity::Severe),
            &SyntheticWaitTimes::at_hour(10),
            &TriageConfig::default(),
        );

        assert_eq!(rec.considered, 5);
        assert_eq!(
            names(&rec),
            [
                "Riverside Medical Center",
                "St. Mary Emergency Care",
                "Bayview Health Campus",
            ]
        );
        assert!((rec.ranked[0].score - 85.2).abs() < 1e-9);
        assert_eq!(rec.ranked[0].total_time, 45.0);
        assert!(rec.ranked.iter().all(|r| r.item.wait_time_estimated));
    }

    #[test]
    fn uses_supplied_wait_source() {
        let waits = FixedWaits(vec![
            ("City General Hospital", 90),
            ("Riverside Medical Center", 90),
            ("St. Mary Emergency Care", 90),
            ("Bayview Health Campus", 5),
            ("Northside Trauma Hospital", 90),
        ]);
        let rec = recommend(
            seed_facilities(),
            &request(Severity::Severe),
            &waits,
            &TriageConfig::default(),
        );

        assert_eq!(names(&rec)[0], "Bayview Health Campus");
        assert!(!rec.ranked[0].item.wait_time_estimated);
    }

    #[test]
    fn respects_config_limits() {
        let config = TriageConfig::new(1, 2);
        let rec = recommend(
            seed_facilities(),
            &request(Severity::Mild),
            &SyntheticWaitTimes::at_hour(0),
            &config,
        );

        assert_eq!(rec.considered, 2);
        assert_eq!(rec.ranked.len(), 1);
    }

    #[test]
    fn ranking_nearby_matches_full_pipeline() {
        let req = request(Severity::Moderate);
        let config = TriageConfig::default();
        let waits = SyntheticWaitTimes::at_hour(10);

        let nearby = nearby_facilities(seed_facilities(), req.origin, config.max_nearby);
        let split = rank_nearby(nearby, &req, &waits, &config);
        let full = recommend(seed_facilities(), &req, &waits, &config);

        assert_eq!(names(&split), names(&full));
        assert_eq!(split.considered, full.considered);
    }

    #[test]
    fn empty_registry() {
        let rec = recommend(
            Vec::new(),
            &request(Severity::Moderate),
            &SyntheticWaitTimes::at_hour(0),
            &TriageConfig::default(),
        );
        assert!(rec.ranked.is_empty());
        assert_eq!(rec.considered, 0);
    }
}
