//! Refreshable in-memory facility registry.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::domain::{DEFAULT_AVERAGE_WAIT_MINUTES, Facility, FacilityId, GeoPoint};

use super::client::{FacilityDocument, RegistryClient, parse_documents};
use super::error::RegistryError;
use super::seed::seed_facilities;

/// Where facility data comes from.
#[derive(Debug, Clone)]
pub enum RegistrySource {
    /// Built-in seed facilities.
    Seed,
    /// A JSON file of the form `{ "facilities": [...] }`.
    File(PathBuf),
    /// A remote registry endpoint.
    Http(RegistryClient),
}

impl RegistrySource {
    async fn load(&self) -> Result<Vec<Facility>, RegistryError> {
        let documents = match self {
            RegistrySource::Seed => return Ok(seed_facilities()),
            RegistrySource::File(path) => {
                let body = std::fs::read_to_string(path).map_err(|e| RegistryError::Io {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
                parse_documents(&body)?
            }
            RegistrySource::Http(client) => client.fetch_all().await?,
        };

        let facilities = build_facilities(documents);
        if facilities.is_empty() {
            info!("registry source is empty, using seed facilities");
            return Ok(seed_facilities());
        }

        Ok(facilities)
    }
}

/// Thread-safe facility registry.
///
/// Holds the current facility list with support for background refresh.
/// Requests get their own copy of the list, so per-request annotations never
/// leak back into the registry.
#[derive(Clone)]
pub struct FacilityRegistry {
    inner: Arc<RwLock<Arc<Vec<Facility>>>>,
    source: RegistrySource,
}

impl FacilityRegistry {
    /// Create a registry by loading from `source`.
    ///
    /// This will fail if the source is unreadable.
    pub async fn load(source: RegistrySource) -> Result<Self, RegistryError> {
        let facilities = source.load().await?;

        Ok(Self {
            inner: Arc::new(RwLock::new(Arc::new(facilities))),
            source,
        })
    }

    /// Create a registry holding the built-in seed facilities.
    pub fn seeded() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(seed_facilities()))),
            source: RegistrySource::Seed,
        }
    }

    /// A fresh copy of all facilities.
    pub async fn facilities(&self) -> Vec<Facility> {
        let guard = self.inner.read().await;
        guard.as_ref().clone()
    }

    /// Get the number of facilities.
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    /// Check if the registry is empty.
    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.is_empty()
    }

    /// Reload facilities from the source.
    ///
    /// On success, replaces the current list. On failure, the existing list
    /// is preserved and the error is returned.
    pub async fn refresh(&self) -> Result<usize, RegistryError> {
        let facilities = self.source.load().await?;
        let count = facilities.len();

        let mut guard = self.inner.write().await;
        *guard = Arc::new(facilities);

        Ok(count)
    }
}

/// Convert registry documents into facilities, skipping invalid entries.
fn build_facilities(documents: Vec<FacilityDocument>) -> Vec<Facility> {
    documents
        .into_iter()
        .enumerate()
        .filter_map(|(i, doc)| {
            let position = match GeoPoint::from_lng_lat(doc.location.coordinates) {
                Ok(p) => p,
                Err(e) => {
                    warn!(name = %doc.name, "skipping facility: {e}");
                    return None;
                }
            };

            let id = doc
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| format!("facility-{}", i + 1));

            let facility = match Facility::new(FacilityId::new(id), doc.name, position) {
                Ok(f) => f,
                Err(e) => {
                    warn!(index = i, "skipping facility: {e}");
                    return None;
                }
            };

            Some(
                facility
                    .with_address(doc.address.unwrap_or_default())
                    .with_average_wait(average_wait(doc.average_wait_minutes)),
            )
        })
        .collect()
}

/// Whole minutes from a registry average, falling back to the default for
/// missing, negative or non-finite values.
fn average_wait(minutes: Option<f64>) -> u32 {
    minutes
        .filter(|m| m.is_finite() && *m >= 0.0)
        .map(|m| m.round().min(f64::from(u32::MAX)) as u32)
        .unwrap_or(DEFAULT_AVERAGE_WAIT_MINUTES)
}
