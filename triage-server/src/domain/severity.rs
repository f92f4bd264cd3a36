//! Patient severity levels.

use std::fmt;

/// Error returned when a severity level is outside 1..=3.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid severity level {0}: must be 1, 2, or 3")]
pub struct InvalidSeverity(pub i64);

/// Urgency of the patient's condition, as assessed upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    /// Parse a numeric severity level (1 = mild, 2 = moderate, 3 = severe).
    pub fn from_level(level: i64) -> Result<Self, InvalidSeverity> {
        match level {
            1 => Ok(Severity::Mild),
            2 => Ok(Severity::Moderate),
            3 => Ok(Severity::Severe),
            other => Err(InvalidSeverity(other)),
        }
    }

    /// The numeric level of this severity.
    pub fn level(self) -> i64 {
        match self {
            Severity::Mild => 1,
            Severity::Moderate => 2,
            Severity::Severe => 3,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Mild => "low",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.level(), self.label())
    }
}
