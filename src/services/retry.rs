//! Bounded exponential backoff for fetch operations.

use std::fmt::Display;
use std::thread;
use std::time::Duration;

use log::warn;

use crate::models::config::RetryConfig;
use crate::repository::errors::{ErrorKind, RepositoryError};
use crate::services::errors::ServiceError;

/// Errors that know whether repeating the call may help.
pub trait Classify {
    fn kind(&self) -> ErrorKind;
}

impl Classify for RepositoryError {
    fn kind(&self) -> ErrorKind {
        RepositoryError::kind(self)
    }
}

impl Classify for ServiceError {
    fn kind(&self) -> ErrorKind {
        ServiceError::kind(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of calls, the first one included.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
        }
    }
}

impl RetryPolicy {
    /// A policy that calls exactly once.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Wait before retry number `retry` (0-based): `base * 2^retry`, capped.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.checked_pow(retry).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Calls `f` until it succeeds, fails with a non-retryable error, or the
    /// attempts are used up. The last error is returned.
    pub fn run<T, E, F>(&self, operation: &str, mut f: F) -> Result<T, E>
    where
        E: Classify + Display,
        F: FnMut() -> Result<T, E>,
    {
        let mut retry = 0;
        loop {
            match f() {
                Ok(value) => return Ok(value),
                Err(err) if !err.kind().is_retryable() || retry + 1 >= self.max_attempts => {
                    return Err(err);
                }
                Err(err) => {
                    let delay = self.delay_for(retry);
                    warn!(
                        "{operation} failed (attempt {} of {}), retrying in {delay:?}: {err}",
                        retry + 1,
                        self.max_attempts
                    );
                    thread::sleep(delay);
                    retry += 1;
                }
            }
        }
    }
}
