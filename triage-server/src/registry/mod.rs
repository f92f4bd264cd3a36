//! Facility registry.
//!
//! Provides the list of candidate facilities, loaded from built-in seed
//! data, a JSON file, or a remote registry, with background refresh.

mod client;
mod error;
mod seed;
mod store;

pub use client::{
    FacilitiesResponse, FacilityDocument, LocationDocument, RegistryClient, RegistryClientConfig,
};
pub use error::RegistryError;
pub use seed::seed_facilities;
pub use store::{FacilityRegistry, RegistrySource};
