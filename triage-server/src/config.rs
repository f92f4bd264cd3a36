//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Default bind address.
const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Default registry refresh interval (1 hour).
const DEFAULT_REFRESH_SECS: u64 = 60 * 60;

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Where facilities are loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySetting {
    Seed,
    File(PathBuf),
    Http { url: String, api_key: Option<String> },
}

/// Process-level configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind: SocketAddr,

    /// Facility registry source.
    pub registry: RegistrySetting,

    /// Directory served under `/static`.
    pub static_dir: PathBuf,

    /// How often to reload the registry.
    pub refresh_interval: Duration,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Recognised variables:
    /// - `TRIAGE_BIND`: socket address (default `127.0.0.1:3000`)
    /// - `PORT`: overrides the port of the bind address
    /// - `FACILITY_REGISTRY_URL` / `FACILITY_REGISTRY_API_KEY`: remote registry
    /// - `FACILITY_REGISTRY_FILE`: JSON registry file, used if no URL is set
    /// - `STATIC_DIR`: static assets directory (default `static`)
    /// - `REGISTRY_REFRESH_SECS`: registry reload interval (default 3600)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_str = var("TRIAGE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let mut bind: SocketAddr = bind_str.trim().parse().map_err(|_| ConfigError::Invalid {
            name: "TRIAGE_BIND",
            value: bind_str.clone(),
        })?;

        if let Some(port) = var("PORT") {
            let port: u16 = port.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: port.clone(),
            })?;
            bind.set_port(port);
        }

        let registry = if let Some(url) = var("FACILITY_REGISTRY_URL") {
            RegistrySetting::Http {
                url,
                api_key: var("FACILITY_REGISTRY_API_KEY"),
            }
        } else if let Some(path) = var("FACILITY_REGISTRY_FILE") {
            RegistrySetting::File(PathBuf::from(path))
        } else {
            RegistrySetting::Seed
        };

        let static_dir = PathBuf::from(var("STATIC_DIR").unwrap_or_else(|| "static".to_string()));

        let refresh_secs = match var("REGISTRY_REFRESH_SECS") {
            Some(s) => s
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid {
                    name: "REGISTRY_REFRESH_SECS",
                    value: s.clone(),
                })?,
            None => DEFAULT_REFRESH_SECS,
        };

        Ok(Self {
            bind,
            registry,
            static_dir,
            refresh_interval: Duration::from_secs(refresh_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();

        assert_eq!(config.bind, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.registry, RegistrySetting::Seed);
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.refresh_interval, Duration::from_secs(3600));
    }

    #[test]
    fn port_overrides_bind() {
        let config = config(&[("TRIAGE_BIND", "0.0.0.0:8080"), ("PORT", "5000")]).unwrap();
        assert_eq!(config.bind, "0.0.0.0:5000".parse().unwrap());
    }

    #[test]
    fn url_wins_over_file() {
        let config = config(&[
            ("FACILITY_REGISTRY_URL", "http://registry/facilities"),
            ("FACILITY_REGISTRY_API_KEY", "k"),
            ("FACILITY_REGISTRY_FILE", "facilities.json"),
        ])
        .unwrap();

        assert_eq!(
            config.registry,
            RegistrySetting::Http {
                url: "http://registry/facilities".into(),
                api_key: Some("k".into()),
            }
        );
    }

    #[test]
    fn file_registry() {
        let config = config(&[("FACILITY_REGISTRY_FILE", "facilities.json")]).unwrap();
        assert_eq!(
            config.registry,
            RegistrySetting::File(PathBuf::from("facilities.json"))
        );
    }

    #[test]
    fn blank_values_are_unset() {
        let config = config(&[("PORT", " "), ("FACILITY_REGISTRY_URL", "")]).unwrap();
        assert_eq!(config.bind.port(), 3000);
        assert_eq!(config.registry, RegistrySetting::Seed);
    }

    #[test]
    fn invalid_values() {
        assert_eq!(
            config(&[("PORT", "http")]).unwrap_err(),
            ConfigError::Invalid {
                name: "PORT",
                value: "http".into()
            }
        );
        assert!(config(&[("TRIAGE_BIND", "localhost")]).is_err());
        assert!(config(&[("REGISTRY_REFRESH_SECS", "0")]).is_err());
        assert!(config(&[("REGISTRY_REFRESH_SECS", "soon")]).is_err());
    }
}
