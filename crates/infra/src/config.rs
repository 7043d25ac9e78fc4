//! Storage configuration loading.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `USE_PERSISTENT_STORES` | `false` | Use Postgres instead of the in-memory store |
//! | `DATABASE_URL` | (none) | Postgres URL, required when persistent |
//! | `DATABASE_MAX_CONNECTIONS` | `5` | Pool size |

use thiserror::Error;

use crate::teacher_store::{PostgresTeacherStore, TeacherStoreError};

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set when USE_PERSISTENT_STORES=true")]
    MissingDatabaseUrl,

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Which teacher store backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    InMemory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::InMemory,
        }
    }
}

impl StoreConfig {
    /// Read configuration through `lookup` (environment-like key/value source).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let use_persistent = match lookup("USE_PERSISTENT_STORES") {
            None => false,
            Some(raw) => raw.trim().parse::<bool>().map_err(|_| ConfigError::Invalid {
                name: "USE_PERSISTENT_STORES",
                value: raw,
            })?,
        };

        if !use_persistent {
            return Ok(Self::default());
        }

        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "DATABASE_MAX_CONNECTIONS",
                        value: raw,
                    });
                }
            },
        };

        Ok(Self {
            backend: StoreBackend::Postgres {
                database_url,
                max_connections,
            },
        })
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self.backend, StoreBackend::Postgres { .. })
    }

    /// Connect and migrate the Postgres store, if one is configured.
    pub async fn connect_postgres(&self) -> Result<Option<PostgresTeacherStore>, TeacherStoreError> {
        match &self.backend {
            StoreBackend::InMemory => Ok(None),
            StoreBackend::Postgres {
                database_url,
                max_connections,
            } => {
                let store = PostgresTeacherStore::connect(database_url, *max_connections).await?;
                store.migrate().await?;
                Ok(Some(store))
            }
        }
    }
}
