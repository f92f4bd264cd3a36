//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{Facility, Severity};
use crate::triage::{Rankable, Ranked};

/// Successful response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { status: "ok", data }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Request to look up nearby facilities.
#[derive(Debug, Default, Deserialize)]
pub struct NearbyRequest {
    /// Latitude as a number or numeric string
    #[serde(default)]
    pub latitude: Option<Value>,

    /// Longitude as a number or numeric string
    #[serde(default)]
    pub longitude: Option<Value>,
}

/// A facility in nearby-lookup results.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyFacilityResult {
    pub id: String,
    pub name: String,
    pub address: String,

    /// Distance from the query point (miles)
    pub distance: f64,

    /// Travel time (minutes)
    pub travel_time: u32,

    pub average_wait_minutes: u32,
}

impl NearbyFacilityResult {
    /// Create from a domain Facility annotated with distance.
    pub fn from_facility(facility: &Facility) -> Self {
        Self {
            id: facility.id.to_string(),
            name: facility.name.clone(),
            address: facility.address.clone().unwrap_or_default(),
            distance: facility.distance_miles.unwrap_or_default(),
            travel_time: facility.travel_time_minutes.unwrap_or_default(),
            average_wait_minutes: facility.average_wait_minutes,
        }
    }
}

/// A facility supplied by the client.
///
/// Fields other than the ones named here are carried through untouched.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Travel time (minutes), as a number or numeric string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_time: Option<Value>,

    /// Wait time (minutes), as a number or numeric string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_time: Option<Value>,

    /// Whether `wait_time` is synthetic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_time_estimated: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FacilityPayload {
    /// The name, if present and non-blank.
    pub fn valid_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.trim().is_empty())
    }
}

impl Rankable for FacilityPayload {
    fn wait_minutes(&self) -> Option<f64> {
        number_value(self.wait_time.as_ref())
    }

    fn travel_minutes(&self) -> Option<f64> {
        number_value(self.travel_time.as_ref())
    }
}

/// Request to estimate wait times.
#[derive(Debug, Default, Deserialize)]
pub struct WaitTimesRequest {
    #[serde(default, rename = "hospitals", alias = "facilities")]
    pub facilities: Option<Vec<FacilityPayload>>,
}

/// Request to rank client-supplied facilities.
#[derive(Debug, Default, Deserialize)]
pub struct RankRequest {
    #[serde(default, rename = "hospitals", alias = "facilities")]
    pub facilities: Option<Vec<FacilityPayload>>,

    /// Severity as a number or numeric string
    #[serde(default)]
    pub severity: Option<Value>,
}

/// A ranked client-supplied facility.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedFacilityResult {
    #[serde(flatten)]
    pub facility: FacilityPayload,
    pub total_time: f64,
    pub score: f64,
}

impl From<Ranked<FacilityPayload>> for RankedFacilityResult {
    fn from(ranked: Ranked<FacilityPayload>) -> Self {
        let mut facility = ranked.item;
        // Computed values replace any the client sent
        facility.extra.remove("totalTime");
        facility.extra.remove("score");

        Self {
            facility,
            total_time: ranked.total_time,
            score: ranked.score,
        }
    }
}

/// Response for ranking.
#[derive(Debug, Serialize)]
pub struct RankResponse<T> {
    pub top3: Vec<T>,
}

/// Request for a full recommendation.
#[derive(Debug, Default, Deserialize)]
pub struct RecommendHttpRequest {
    #[serde(default)]
    pub latitude: Option<Value>,
    #[serde(default)]
    pub longitude: Option<Value>,
    #[serde(default)]
    pub severity: Option<Value>,
}

/// A recommended registry facility.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedFacilityResult {
    pub id: String,
    pub name: String,
    pub address: String,
    pub distance: f64,
    pub travel_time: u32,
    pub wait_time: u32,
    pub wait_time_estimated: bool,
    pub average_wait_minutes: u32,
    pub total_time: f64,
    pub score: f64,
}

impl RecommendedFacilityResult {
    /// Create from a ranked domain Facility.
    pub fn from_ranked(ranked: &Ranked<Facility>) -> Self {
        let f = &ranked.item;
        Self {
            id: f.id.to_string(),
            name: f.name.clone(),
            address: f.address.clone().unwrap_or_default(),
            distance: f.distance_miles.unwrap_or_default(),
            travel_time: f.travel_time_minutes.unwrap_or_default(),
            wait_time: f.wait_time_minutes.unwrap_or_default(),
            wait_time_estimated: f.wait_time_estimated,
            average_wait_minutes: f.average_wait_minutes,
            total_time: ranked.total_time,
            score: ranked.score,
        }
    }
}

// Loose value parsing

/// Read a number or numeric string, as a browser form would send it.
pub fn number_value(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Read a severity level given as a number or numeric string.
pub fn severity_value(value: Option<&Value>) -> Option<Severity> {
    let n = number_value(value)?;
    if n.fract() != 0.0 {
        return None;
    }
    Severity::from_level(n as i64).ok()
}
