//! Tool dispatcher port
//!
//! Defines the fixed invocation contract the agent host calls into.

use async_trait::async_trait;
use toolrelay_domain::tool::{
    entities::{ToolCall, ToolCatalog, ToolDefinition},
    value_objects::ToolResponse,
};

/// Port for dispatching tool calls
///
/// Implementations never fail: every outcome, including unknown tools and
/// handler defects, is expressed as a [`ToolResponse`].
#[async_trait]
pub trait ToolDispatcherPort: Send + Sync {
    /// Get the catalog of all registered tools
    fn catalog(&self) -> &ToolCatalog;

    /// Check if a tool is registered
    fn has_tool(&self, name: &str) -> bool {
        self.catalog().contains(name)
    }

    /// Get the definition of a specific tool
    fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.catalog().get(name)
    }

    /// Get names of all registered tools, in registration order
    fn available_tools(&self) -> Vec<&str> {
        self.catalog().names().collect()
    }

    /// Dispatch a tool call
    async fn dispatch(&self, call: &ToolCall) -> ToolResponse;
}
