//! HTTP facility registry client.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::error::RegistryError;

/// Wrapper for the registry response.
///
/// Entries are kept as raw JSON so each one can be checked on its own.
#[derive(Debug, Deserialize, Serialize)]
pub struct FacilitiesResponse {
    pub facilities: Vec<Value>,
}

/// A facility as stored in the registry.
///
/// Coordinates are GeoJSON-ordered: `[longitude, latitude]`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityDocument {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub location: LocationDocument,
    #[serde(default)]
    pub average_wait_minutes: Option<f64>,
}

/// GeoJSON point.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationDocument {
    #[serde(rename = "type", default = "point_type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

fn point_type() -> String {
    "Point".to_string()
}

/// Configuration for the registry client.
#[derive(Debug, Clone)]
pub struct RegistryClientConfig {
    /// URL of the facilities endpoint
    pub url: String,
    /// Optional API key sent as `x-apikey`
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RegistryClientConfig {
    /// Create a new config for the given endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
            timeout_secs: 30,
        }
    }

    /// Set an API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

/// Client for a remote facility registry.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    url: String,
}

impl RegistryClient {
    /// Create a new registry client.
    pub fn new(config: RegistryClientConfig) -> Result<Self, RegistryError> {
        let mut headers = HeaderMap::new();

        if let Some(api_key) = &config.api_key {
            let value = HeaderValue::from_str(api_key).map_err(|_| RegistryError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
            headers.insert(HeaderName::from_static("x-apikey"), value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    /// The endpoint this client reads from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch all facilities from the registry.
    pub async fn fetch_all(&self) -> Result<Vec<FacilityDocument>, RegistryError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(RegistryError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RegistryError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_documents(&body)
    }
}

/// Parse a `{ "facilities": [...] }` document.
///
/// A malformed envelope is an error. Malformed entries are skipped with a
/// warning.
pub fn parse_documents(body: &str) -> Result<Vec<FacilityDocument>, RegistryError> {
    let response: FacilitiesResponse =
        serde_json::from_str(body).map_err(|e| RegistryError::Json {
            message: e.to_string(),
        })?;

    let documents = response
        .facilities
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| match serde_json::from_value(entry) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!(index = i, "skipping malformed facility: {e}");
                None
            }
        })
        .collect();

    Ok(documents)
}
