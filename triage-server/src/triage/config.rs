//! Tunables for facility lookup and ranking.

use super::rank::DEFAULT_RANKED;

/// Configuration parameters for the triage pipeline.
#[derive(Debug, Clone)]
pub struct TriageConfig {
    /// Maximum number of facilities in a ranked recommendation.
    pub max_ranked: usize,

    /// Maximum number of facilities returned by a nearby lookup.
    /// Only the closest are kept.
    pub max_nearby: usize,
}

impl TriageConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_ranked: usize, max_nearby: usize) -> Self {
        Self {
            max_ranked,
            max_nearby,
        }
    }
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            max_ranked: DEFAULT_RANKED,
            max_nearby: 10,
        }
    }
}
