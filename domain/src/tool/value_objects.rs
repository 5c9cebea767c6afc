//! Tool domain value objects: handler output, dispatcher responses and errors
//!
//! A handler produces a [`ToolResult`]. The dispatcher wraps it into a
//! [`ToolResponse`], which is the only thing handed back to the agent host.
//! Failures carry a [`ToolError`] for diagnostics, but the response `text`
//! is always a short, human-readable sentence and never raw error output.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error code: the requested tool is not registered
pub const UNKNOWN_TOOL: &str = "UNKNOWN_TOOL";
/// Error code: the handler returned an error or panicked
pub const HANDLER_FAILED: &str = "HANDLER_FAILED";

/// Structured error attached to a failed [`ToolResponse`].
///
/// | Code | Cause |
/// |------|-------|
/// | `UNKNOWN_TOOL` | Name absent from the registry |
/// | `HANDLER_FAILED` | Handler error or panic |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "UNKNOWN_TOOL")
    pub code: String,
    /// Short description suitable for logs
    pub message: String,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::new(UNKNOWN_TOOL, format!("Unknown tool: {}", name.into()))
    }

    pub fn handler_failed(name: impl Into<String>) -> Self {
        Self::new(HANDLER_FAILED, format!("Handler failed: {}", name.into()))
    }

    pub fn is_unknown_tool(&self) -> bool {
        self.code == UNKNOWN_TOOL
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ToolError {}

/// Output of a tool handler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Human-readable text for the agent to speak
    pub text: String,
    /// Optional machine-readable payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<Map<String, Value>>,
}

impl ToolResult {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            structured_data: None,
        }
    }

    /// Add one field to the structured payload
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.structured_data
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Response handed back to the agent host for one invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Name of the tool that was requested
    pub tool_name: String,
    /// Whether the invocation completed
    pub success: bool,
    /// Human-readable text, never empty
    pub text: String,
    /// Structured payload from the handler, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<Map<String, Value>>,
    /// Error information (for failed invocations)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    /// Wall-clock duration of the invocation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl ToolResponse {
    /// Wrap a handler result verbatim
    pub fn completed(tool_name: impl Into<String>, result: ToolResult) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            text: result.text,
            structured_data: result.structured_data,
            error: None,
            duration_ms: None,
        }
    }

    /// Build a failure response with user-facing `text`
    pub fn failed(tool_name: impl Into<String>, text: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            text: text.into(),
            structured_data: None,
            error: Some(error),
            duration_ms: None,
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error() {
        let err = ToolError::unknown_tool("teleport");
        assert_eq!(err.code, UNKNOWN_TOOL);
        assert!(err.is_unknown_tool());
        assert_eq!(err.to_string(), "[UNKNOWN_TOOL] Unknown tool: teleport");
    }

    #[test]
    fn test_tool_result_fields() {
        let result = ToolResult::new("Inventory for X: 30 total")
            .with_field("total", 30)
            .with_field("sku", "X");

        let data = result.structured_data.as_ref().unwrap();
        assert_eq!(data["total"], 30);
        assert_eq!(data["sku"], "X");
    }

    #[test]
    fn test_completed_wraps_verbatim() {
        let result = ToolResult::new("Zip 90210 is in west zone").with_field("zone", "west");
        let response =
            ToolResponse::completed("get_shipping_zone", result.clone()).with_duration(3);

        assert!(response.is_success());
        assert_eq!(response.text, result.text);
        assert_eq!(response.structured_data, result.structured_data);
        assert_eq!(response.duration_ms, Some(3));
        assert!(response.error().is_none());
    }

    #[test]
    fn test_failed_response_serialization() {
        let response = ToolResponse::failed(
            "teleport",
            "Sorry, I can't do that right now.",
            ToolError::unknown_tool("teleport"),
        );
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "UNKNOWN_TOOL");
        assert!(json.get("structured_data").is_none());
    }
}
