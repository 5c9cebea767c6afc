//! HTTP status check for an external dependency

use async_trait::async_trait;
use toolrelay_application::ports::service_status::{ServiceStatusPort, StatusError};
use tracing::debug;

/// Issues a single GET and treats any HTTP answer as healthy.
///
/// Only a failed request (DNS, connect, TLS, reset) counts as down; an error
/// status still proves the service is reachable.
///
/// The client carries no timeout of its own; the deadline belongs to the
/// caller's guarded call.
#[derive(Debug, Clone)]
pub struct HttpStatusCheck {
    client: reqwest::Client,
    url: String,
}

impl HttpStatusCheck {
    pub fn new(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("toolrelay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ServiceStatusPort for HttpStatusCheck {
    fn service_name(&self) -> &str {
        &self.url
    }

    async fn check(&self) -> Result<(), StatusError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| StatusError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            debug!(
                url = %self.url,
                status = status.as_u16(),
                "Status endpoint answered with an error status"
            );
        }

        Ok(())
    }
}
