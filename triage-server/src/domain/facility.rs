//! Care facility types.

use std::fmt;

use super::{DomainError, GeoPoint};

/// Default baseline wait for a facility with no recorded average (minutes).
pub const DEFAULT_AVERAGE_WAIT_MINUTES: u32 = 30;

/// Opaque identifier of a facility in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FacilityId(String);

impl FacilityId {
    /// Wrap a registry identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A candidate care location.
///
/// The registry fields (`id` through `average_wait_minutes`) are fixed at
/// construction. The remaining fields are filled in per request by the
/// triage pipeline and are never written back to the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Facility {
    pub id: FacilityId,
    pub name: String,
    pub address: Option<String>,
    pub position: GeoPoint,

    /// Static seed value from the registry.
    pub average_wait_minutes: u32,

    /// Great-circle distance from the query point (miles).
    pub distance_miles: Option<f64>,

    /// Estimated travel time from the query point (minutes, >= 4 once set).
    pub travel_time_minutes: Option<u32>,

    /// Current wait time (minutes).
    pub wait_time_minutes: Option<u32>,

    /// True when `wait_time_minutes` is synthetic rather than measured.
    pub wait_time_estimated: bool,
}

impl Facility {
    /// Create a facility with no per-request fields computed.
    ///
    /// The name must contain at least one non-whitespace character.
    pub fn new(
        id: FacilityId,
        name: impl Into<String>,
        position: GeoPoint,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }

        Ok(Self {
            id,
            name,
            address: None,
            position,
            average_wait_minutes: DEFAULT_AVERAGE_WAIT_MINUTES,
            distance_miles: None,
            travel_time_minutes: None,
            wait_time_minutes: None,
            wait_time_estimated: false,
        })
    }

    /// Set the postal address. Blank addresses are stored as `None`.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        let address = address.into().trim().to_string();
        self.address = (!address.is_empty()).then_some(address);
        self
    }

    /// Set the baseline average wait.
    pub fn with_average_wait(mut self, minutes: u32) -> Self {
        self.average_wait_minutes = minutes;
        self
    }
}
