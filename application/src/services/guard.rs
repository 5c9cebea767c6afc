//! Timeout-guarded call
//!
//! Runs one outbound operation under a hard deadline. On expiry the
//! operation's future is dropped, which cancels it and releases whatever it
//! held (sockets, timers), so nothing keeps running after the caller moved on.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// Why a guarded call did not produce a value
#[derive(Debug, Error)]
pub enum GuardError {
    #[error("Operation timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Operation failed: {0}")]
    Failed(String),
}

impl GuardError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, GuardError::Timeout(_))
    }
}

/// Await `operation` for at most `timeout`.
pub async fn call_with_timeout<T, E, F>(operation: F, timeout: Duration) -> Result<T, GuardError>
where
    F: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(GuardError::Failed(e.to_string())),
        Err(_) => Err(GuardError::Timeout(timeout)),
    }
}
