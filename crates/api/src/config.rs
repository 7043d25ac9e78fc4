//! Server configuration.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BIND_ADDR` | `0.0.0.0:8080` | Listen address |
//!
//! Storage settings are read by [`faculty_infra::StoreConfig`].

use std::net::SocketAddr;

use faculty_infra::{ConfigError, StoreConfig};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw.trim().parse::<SocketAddr>().map_err(|_| ConfigError::Invalid {
            name: "BIND_ADDR",
            value: raw.clone(),
        })?;

        Ok(Self {
            bind_addr,
            store: StoreConfig::from_lookup(lookup)?,
        })
    }
}
