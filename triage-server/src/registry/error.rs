//! Facility registry error types.

/// Errors that can occur when loading facilities from the registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check FACILITY_REGISTRY_API_KEY")]
    Unauthorized,

    /// Registry returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse registry JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Failed to read a registry file
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}
