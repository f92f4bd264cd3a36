//! Domain error types.
//!
//! These errors represent validation failures when building domain values
//! from registry or request data. They are distinct from API/IO errors.

use super::{InvalidGeoPoint, InvalidSeverity};

/// Domain-level errors for validation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Facility name is empty or whitespace
    #[error("facility name must not be empty")]
    EmptyName,

    /// Coordinates failed validation
    #[error(transparent)]
    InvalidPosition(#[from] InvalidGeoPoint),

    /// Severity level outside 1..=3
    #[error(transparent)]
    InvalidSeverity(#[from] InvalidSeverity),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeoPoint, Severity};

    #[test]
    fn error_display() {
        let err = DomainError::EmptyName;
        assert_eq!(err.to_string(), "facility name must not be empty");

        let err: DomainError = GeoPoint::new(0.0, 200.0).unwrap_err().into();
        assert_eq!(
            err.to_string(),
            "invalid coordinates: longitude must be within [-180, 180]"
        );

        let err: DomainError = Severity::from_level(9).unwrap_err().into();
        assert_eq!(err.to_string(), "invalid severity level 9: must be 1, 2, or 3");
    }
}
