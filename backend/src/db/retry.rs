//! Bounded retry policy for establishing the initial storage connection.
//!
//! Only startup goes through this path. Individual requests are never
//! retried; a failed query is reported to the caller as-is.

use log::{info, warn};
use std::future::Future;
use std::time::Duration;

use super::repository::{RepositoryError, RepositoryResult};

/// Linear-backoff retry policy: attempt `n` failing sleeps `n * backoff`
/// before attempt `n + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectRetryPolicy {
    /// Total attempts, including the first one. Values below 1 are treated as 1.
    pub max_attempts: u32,
    /// Backoff unit multiplied by the attempt number.
    pub backoff: Duration,
}

impl Default for ConnectRetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff: Duration::from_secs(1),
        }
    }
}

impl ConnectRetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }

    /// Delay to wait after the given (1-based) failed attempt.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff * attempt
    }

    /// Run `connect` until it succeeds or the attempts are exhausted.
    ///
    /// Returns the last error when every attempt failed.
    pub async fn run<T, F, Fut>(&self, target: &str, mut connect: F) -> RepositoryResult<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = RepositoryResult<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut last_error: Option<RepositoryError> = None;

        for attempt in 1..=max_attempts {
            info!("connecting to {} (attempt {}/{})", target, attempt, max_attempts);
            match connect(attempt).await {
                Ok(conn) => {
                    info!("connection to {} established", target);
                    return Ok(conn);
                }
                Err(e) => {
                    warn!(
                        "failed to connect to {} on attempt {}: {}",
                        target, attempt, e
                    );
                    last_error = Some(e);
                    if attempt < max_attempts {
                        tokio::time::sleep(self.delay_after(attempt)).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            RepositoryError::internal("connect", "retry finished with no error captured")
        }))
    }
}
