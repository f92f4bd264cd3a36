//! Domain types for the triage server.
//!
//! This module contains the core domain model types: validated coordinates,
//! severity levels and care facilities. All types enforce their invariants
//! at construction time, so code that receives these types can trust their
//! validity.

mod error;
mod facility;
mod geo;
mod severity;

pub use error::DomainError;
pub use facility::{DEFAULT_AVERAGE_WAIT_MINUTES, Facility, FacilityId};
pub use geo::{GeoPoint, InvalidGeoPoint};
pub use severity::{InvalidSeverity, Severity};
