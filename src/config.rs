//! Configuration
//!
//! Two sources:
//! - a `.env` file holding connection settings and the API port (required)
//! - an optional `versedb.toml` holding ingestion defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::{Error, Result};

pub const DB_HOST: &str = "DB_HOST";
pub const DB_PORT: &str = "DB_PORT";
pub const DB_USER: &str = "DB_USER";
pub const DB_PASSWORD: &str = "DB_PASSWORD";
pub const DB_NAME: &str = "DB_NAME";
pub const API_PORT: &str = "API_PORT";

pub fn default_config_path() -> PathBuf {
    PathBuf::from("versedb.toml")
}

/// Store connection settings.
///
/// The store is an embedded SQLite file named by `DB_NAME`. Host, port, user
/// and password are accepted so an env file written for a server database
/// still loads, but they play no part in opening the store.
#[derive(Clone, Default)]
pub struct DatabaseConfig {
    pub name: String,
    pub host: Option<String>,
    pub port: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl DatabaseConfig {
    /// Path of the database file
    pub fn path(&self) -> PathBuf {
        PathBuf::from(&self.name)
    }

    /// Names of the settings that are present but unused by the embedded store
    pub fn ignored_settings(&self) -> Vec<&'static str> {
        [
            (DB_HOST, self.host.is_some()),
            (DB_PORT, self.port.is_some()),
            (DB_USER, self.user.is_some()),
            (DB_PASSWORD, self.password.is_some()),
        ]
        .into_iter()
        .filter_map(|(key, set)| set.then_some(key))
        .collect()
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("name", &self.name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Settings read from the env file
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub database: DatabaseConfig,
    pub api_port: Option<u16>,
}

impl EnvConfig {
    /// Load the env file into the process environment, then read settings from it.
    ///
    /// Variables already set in the process win over the file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Config(format!("env file not found at {}", path.display())));
        }
        dotenvy::from_path(path)
            .map_err(|e| Error::Config(format!("failed to load {}: {}", path.display(), e)))?;

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let name = get(DB_NAME).ok_or_else(|| Error::Config(format!("{} is not set", DB_NAME)))?;

        let api_port = match get(API_PORT) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u16>()
                    .map_err(|_| Error::Config(format!("{} is not a valid port: {}", API_PORT, raw)))?,
            ),
            None => None,
        };

        Ok(Self {
            database: DatabaseConfig {
                name,
                host: get(DB_HOST),
                port: get(DB_PORT),
                user: get(DB_USER),
                password: get(DB_PASSWORD),
            },
            api_port,
        })
    }

    /// The listen port, required by the query service
    pub fn require_api_port(&self) -> Result<u16> {
        self.api_port
            .ok_or_else(|| Error::Config(format!("{} is not set", API_PORT)))
    }
}

/// Ingestion defaults from `versedb.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IngestConfig {
    pub input: Option<PathBuf>,
    pub version: Option<String>,
    pub progress_every: Option<usize>,
}

pub fn load_config(path: Option<&Path>) -> Result<Option<IngestConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: IngestConfig = toml::from_str(&contents)
        .map_err(|e| Error::Config(format!("invalid {}: {}", path.display(), e)))?;
    Ok(Some(config))
}
