//! Process configuration.
//!
//! Built once at startup from environment-style key/value lookup and passed
//! by value to whatever needs it. Nothing here is global.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::db::config::PostgresConfig;
use crate::db::factory::RepositoryType;
use crate::db::repository::RepositoryError;

/// Default listen address, Go-style `:PORT` meaning all interfaces.
pub const DEFAULT_HTTP_PORT: &str = ":8080";
/// Default bound on graceful shutdown.
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 5;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Socket address to bind, already normalized (e.g. `0.0.0.0:8080`).
    pub http_addr: String,
    pub shutdown_grace: Duration,
    pub repository_type: RepositoryType,
    /// Optional `repository.toml`; when set it decides the backend instead
    /// of the environment.
    pub repository_config_path: Option<PathBuf>,
    pub postgres: PostgresConfig,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Environment Variables
    /// - `HTTP_PORT`: listen address (default: `:8080`). `:PORT` or a bare
    ///   port binds all interfaces; `HOST:PORT` is used as-is.
    /// - `SHUTDOWN_GRACE_SECS`: graceful shutdown bound (default: 5)
    /// - `REPOSITORY_TYPE`: `local` or `postgres` (see [`RepositoryType::from_env`])
    /// - `REPOSITORY_CONFIG`: path to a `repository.toml`
    /// - Postgres keys: see [`PostgresConfig::from_env`]
    pub fn from_env() -> Result<Self, RepositoryError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`], reading keys through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RepositoryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let http_addr = normalize_addr(
            get("HTTP_PORT")
                .as_deref()
                .unwrap_or(DEFAULT_HTTP_PORT),
        );
        let shutdown_grace = Duration::from_secs(
            get("SHUTDOWN_GRACE_SECS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_SHUTDOWN_GRACE_SECS),
        );

        Ok(Self {
            http_addr,
            shutdown_grace,
            repository_type: RepositoryType::from_lookup(&lookup)?,
            repository_config_path: get("REPOSITORY_CONFIG").map(PathBuf::from),
            postgres: PostgresConfig::from_lookup(&lookup),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http_addr: normalize_addr(DEFAULT_HTTP_PORT),
            shutdown_grace: Duration::from_secs(DEFAULT_SHUTDOWN_GRACE_SECS),
            repository_type: RepositoryType::Local,
            repository_config_path: None,
            postgres: PostgresConfig::default(),
        }
    }
}

/// Turn `:8080` or `8080` into `0.0.0.0:8080`; leave `host:port` alone.
fn normalize_addr(raw: &str) -> String {
    let raw = raw.trim();
    if let Some(port) = raw.strip_prefix(':') {
        format!("0.0.0.0:{}", port)
    } else if raw.chars().all(|c| c.is_ascii_digit()) {
        format!("0.0.0.0:{}", raw)
    } else {
        raw.to_string()
    }
}
