//! Facility ranking for recommendations.
//!
//! Combines wait time and travel time into one weighted score per facility,
//! with the weights chosen by severity. Lower scores rank first.

use crate::domain::{Facility, Severity};

/// Number of facilities a ranking returns unless told otherwise.
pub const DEFAULT_RANKED: usize = 3;

/// Weights applied to wait time (`alpha`) and travel time (`beta`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub alpha: f64,
    pub beta: f64,
}

impl ScoreWeights {
    /// Weights used for a severity level outside 1..=3.
    pub const DEFAULT: Self = Self {
        alpha: 1.0,
        beta: 1.5,
    };

    /// Weights for a validated severity.
    ///
    /// Higher severity shifts weight from travel time to wait time.
    pub fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::Mild => Self {
                alpha: 0.8,
                beta: 1.5,
            },
            Severity::Moderate => Self {
                alpha: 1.2,
                beta: 1.2,
            },
            Severity::Severe => Self {
                alpha: 2.0,
                beta: 0.8,
            },
        }
    }

    /// Weights for a raw severity level, falling back to [`Self::DEFAULT`].
    pub fn for_level(level: i64) -> Self {
        Severity::from_level(level)
            .map(Self::for_severity)
            .unwrap_or(Self::DEFAULT)
    }

    /// Weighted score, rounded to two decimal places.
    pub fn score(&self, wait_minutes: f64, travel_minutes: f64) -> f64 {
        round2(wait_minutes * self.alpha + travel_minutes * self.beta)
    }
}

/// Round half up to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Anything that can be ranked by wait and travel time.
///
/// Missing values are scored as zero.
pub trait Rankable {
    fn wait_minutes(&self) -> Option<f64>;
    fn travel_minutes(&self) -> Option<f64>;
}

impl Rankable for Facility {
    fn wait_minutes(&self) -> Option<f64> {
        self.wait_time_minutes.map(f64::from)
    }

    fn travel_minutes(&self) -> Option<f64> {
        self.travel_time_minutes.map(f64::from)
    }
}

/// A ranked item with its display total and ordering score.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<T> {
    pub item: T,

    /// Unweighted wait + travel (minutes), for display only.
    pub total_time: f64,

    /// Weighted score used for ordering.
    pub score: f64,
}

/// Rank items by weighted score, best first, keeping at most `limit`.
///
/// The sort is stable: items with equal scores keep their input order.
pub fn rank_with_weights<T, I>(items: I, weights: ScoreWeights, limit: usize) -> Vec<Ranked<T>>
where
    T: Rankable,
    I: IntoIterator<Item = T>,
{
    let mut scored: Vec<Ranked<T>> = items
        .into_iter()
        .map(|item| {
            let wait = item.wait_minutes().unwrap_or(0.0);
            let travel = item.travel_minutes().unwrap_or(0.0);
            Ranked {
                total_time: wait + travel,
                score: weights.score(wait, travel),
                item,
            }
        })
        .collect();

    scored.sort_by(|a, b| a.score.total_cmp(&b.score));
    scored.truncate(limit);
    scored
}

/// Rank items for a severity, returning the top [`DEFAULT_RANKED`].
pub fn rank_facilities<T, I>(items: I, severity: Severity) -> Vec<Ranked<T>>
where
    T: Rankable,
    I: IntoIterator<Item = T>,
{
    rank_with_weights(items, ScoreWeights::for_severity(severity), DEFAULT_RANKED)
}

/// Rank items for a raw severity level, returning the top [`DEFAULT_RANKED`].
///
/// Levels outside 1..=3 use [`ScoreWeights::DEFAULT`].
pub fn rank_by_level<T, I>(items: I, level: i64) -> Vec<Ranked<T>>
where
    T: Rankable,
    I: IntoIterator<Item = T>,
{
    rank_with_weights(items, ScoreWeights::for_level(level), DEFAULT_RANKED)
}
