//! Tool handler port
//!
//! A handler is the executable half of a catalog entry: it receives a call
//! whose arguments have already been shape-checked and returns a
//! [`ToolResult`]. Handlers own their own degradation policy; an `Err` here
//! is a defect that the dispatcher turns into a structured failure.

use async_trait::async_trait;
use thiserror::Error;
use toolrelay_domain::tool::{
    entities::{ToolCall, ToolDefinition},
    value_objects::ToolResult,
};

/// Error raised by a handler that could not produce any result
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Handler failed: {0}")]
    Failed(String),

    #[error("Handler dependency unavailable: {0}")]
    Unavailable(String),
}

/// Executable tool: definition plus behavior
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Schema and fillers advertised to the host
    fn definition(&self) -> ToolDefinition;

    /// Run the tool
    async fn handle(&self, call: &ToolCall) -> Result<ToolResult, HandlerError>;
}
