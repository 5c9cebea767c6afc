//! External service tool: check_external_service
//!
//! The status check runs under a hard deadline. Timeouts and failures both
//! complete the call with a degraded message instead of an error.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use toolrelay_application::ports::service_status::ServiceStatusPort;
use toolrelay_application::ports::tool_handler::{HandlerError, ToolHandler};
use toolrelay_application::services::guard::{GuardError, call_with_timeout};
use toolrelay_domain::tool::{
    entities::{ToolCall, ToolDefinition},
    value_objects::ToolResult,
};
use tracing::warn;

pub const CHECK_EXTERNAL_SERVICE: &str = "check_external_service";

const ONLINE_TEXT: &str = "External service: Online";
const TIMEOUT_TEXT: &str = "External service check timed out. Functionality may be limited.";
const FAILURE_TEXT: &str = "Could not check external service. Please try again.";

pub fn check_external_service_definition() -> ToolDefinition {
    ToolDefinition::new(
        CHECK_EXTERNAL_SERVICE,
        "Check whether the external service is reachable",
    )
    .with_filler("Checking service status...")
}

pub struct CheckExternalServiceTool {
    status: Arc<dyn ServiceStatusPort>,
    timeout: Duration,
}

impl CheckExternalServiceTool {
    pub fn new(status: Arc<dyn ServiceStatusPort>, timeout: Duration) -> Self {
        Self { status, timeout }
    }
}

#[async_trait]
impl ToolHandler for CheckExternalServiceTool {
    fn definition(&self) -> ToolDefinition {
        check_external_service_definition()
    }

    async fn handle(&self, _call: &ToolCall) -> Result<ToolResult, HandlerError> {
        let result = match call_with_timeout(self.status.check(), self.timeout).await {
            Ok(()) => ToolResult::new(ONLINE_TEXT).with_field("status", "online"),
            Err(GuardError::Timeout(after)) => {
                warn!(
                    service = self.status.service_name(),
                    timeout_ms = after.as_millis() as u64,
                    "External service check timed out"
                );
                ToolResult::new(TIMEOUT_TEXT).with_field("status", "timeout")
            }
            Err(GuardError::Failed(cause)) => {
                warn!(
                    service = self.status.service_name(),
                    error = %cause,
                    "External service check failed"
                );
                ToolResult::new(FAILURE_TEXT).with_field("status", "error")
            }
        };
        Ok(result)
    }
}
