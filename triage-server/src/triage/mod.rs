//! Facility triage: distance, wait-time and ranking.
//!
//! This module turns a patient location, a severity level and a list of
//! candidate facilities into an ordered recommendation:
//! "Given how urgent this is, where should I go?"
//!
//! Every function here is synchronous and free of shared state, so it can be
//! called from concurrent requests without coordination. The only
//! time-dependent input is the hour of day used by the synthetic wait-time
//! estimator.

mod config;
pub mod distance;
mod nearby;
pub mod rank;
mod recommend;
pub mod waittime;

pub use config::TriageConfig;
pub use distance::{TravelEstimate, estimate as estimate_travel, haversine_miles};
pub use nearby::nearby_facilities;
pub use rank::{Rankable, Ranked, ScoreWeights, rank_by_level, rank_facilities, rank_with_weights};
pub use recommend::{Recommendation, RecommendRequest, rank_nearby, recommend};
pub use waittime::{
    SyntheticWaitTimes, WaitEstimate, WaitTimeSource, estimate_wait_times, synthetic_wait_minutes,
};
