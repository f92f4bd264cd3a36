//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::WaitTimeCache;
use crate::registry::FacilityRegistry;
use crate::triage::TriageConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Facility registry
    pub registry: FacilityRegistry,

    /// Cached wait-time estimates
    pub wait_times: Arc<WaitTimeCache>,

    /// Lookup and ranking configuration
    pub config: Arc<TriageConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(registry: FacilityRegistry, wait_times: WaitTimeCache, config: TriageConfig) -> Self {
        Self {
            registry,
            wait_times: Arc::new(wait_times),
            config: Arc::new(config),
        }
    }
}
