//! Database configuration and environment variable handling.

use std::env;
use std::time::Duration;

use super::retry::ConnectRetryPolicy;

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of idle connections kept in the pool
    pub min_pool_size: u32,
    /// Connection checkout timeout in seconds
    pub connection_timeout_sec: u64,
    /// Maximum lifetime of a pooled connection in seconds
    pub max_lifetime_sec: u64,
    /// Attempts made to reach the database at startup
    pub connect_attempts: u32,
    /// Linear backoff unit between startup attempts, in milliseconds
    pub connect_backoff_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: compose_database_url(|_| None),
            max_pool_size: 10,
            min_pool_size: 5,
            connection_timeout_sec: 30,
            max_lifetime_sec: 3600,
            connect_attempts: 5,
            connect_backoff_ms: 1000,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `DATABASE_URL` or `PG_DATABASE_URL`: full connection string. When
    ///   neither is set the URL is composed from the parts below.
    /// - `DB_HOST` (default: localhost), `DB_PORT` (default: 5432),
    ///   `DB_USER` (default: postgres), `DB_PASS` (default: postgres),
    ///   `DB_NAME` (default: qna), `DB_SSLMODE` (default: disable)
    /// - `PG_POOL_MAX`: Maximum pool size (default: 10)
    /// - `PG_POOL_MIN`: Minimum idle connections (default: 5)
    /// - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
    /// - `PG_MAX_LIFETIME_SEC`: Connection lifetime in seconds (default: 3600)
    /// - `PG_CONNECT_ATTEMPTS`: Startup connection attempts (default: 5)
    /// - `PG_CONNECT_BACKOFF_MS`: Backoff unit between attempts (default: 1000)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`PostgresConfig::from_env`], reading keys through `lookup`.
    ///
    /// Empty values count as unset. Unparseable numbers fall back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup("PG_DATABASE_URL"))
            .unwrap_or_else(|| compose_database_url(&lookup));

        Self {
            database_url,
            max_pool_size: parse_or(lookup("PG_POOL_MAX"), defaults.max_pool_size),
            min_pool_size: parse_or(lookup("PG_POOL_MIN"), defaults.min_pool_size),
            connection_timeout_sec: parse_or(
                lookup("PG_CONN_TIMEOUT_SEC"),
                defaults.connection_timeout_sec,
            ),
            max_lifetime_sec: parse_or(lookup("PG_MAX_LIFETIME_SEC"), defaults.max_lifetime_sec),
            connect_attempts: parse_or(lookup("PG_CONNECT_ATTEMPTS"), defaults.connect_attempts),
            connect_backoff_ms: parse_or(
                lookup("PG_CONNECT_BACKOFF_MS"),
                defaults.connect_backoff_ms,
            ),
        }
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }

    /// Retry policy used while establishing the pool at startup.
    pub fn retry_policy(&self) -> ConnectRetryPolicy {
        ConnectRetryPolicy::new(
            self.connect_attempts,
            Duration::from_millis(self.connect_backoff_ms),
        )
    }

    /// Connection URL with the password replaced, for log lines.
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.database_url.split_once("://") else {
            return self.database_url.clone();
        };
        match rest.split_once('@') {
            Some((credentials, host)) => {
                let user = credentials.split(':').next().unwrap_or_default();
                format!("{}://{}:***@{}", scheme, user, host)
            }
            None => self.database_url.clone(),
        }
    }
}

fn compose_database_url<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
    format!(
        "postgres://{}:{}@{}:{}/{}?sslmode={}",
        get("DB_USER", "postgres"),
        get("DB_PASS", "postgres"),
        get("DB_HOST", "localhost"),
        get("DB_PORT", "5432"),
        get("DB_NAME", "qna"),
        get("DB_SSLMODE", "disable"),
    )
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}
