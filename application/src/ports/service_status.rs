//! External service status port

use async_trait::async_trait;
use thiserror::Error;

/// Error from an external status check
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("Request failed: {0}")]
    Request(String),
}

/// Port for probing one external dependency
///
/// Implementations perform a single outbound call without their own
/// deadline; callers wrap it in [`call_with_timeout`](crate::services::guard::call_with_timeout).
#[async_trait]
pub trait ServiceStatusPort: Send + Sync {
    /// Name used in logs
    fn service_name(&self) -> &str;

    /// Succeeds when the service answered at all
    async fn check(&self) -> Result<(), StatusError>;
}
