//! Tool Registry
//!
//! The [`ToolRegistry`] owns the tool catalog and implements
//! [`ToolDispatcherPort`]: it resolves a call by name, shape-checks the
//! arguments, emits a filler, runs the handler and wraps the outcome.
//!
//! # Usage
//!
//! ```ignore
//! use toolrelay_infrastructure::tools::{ToolRegistry, GetProductTool};
//!
//! let registry = ToolRegistry::new()
//!     .with_filler_notifier(Arc::new(ConsoleFiller))
//!     .register(GetProductTool::new(Duration::from_millis(300)))?;
//!
//! let call = ToolCall::new("get_product").with_arg("product_id", "W-1");
//! let response = registry.dispatch(&call).await;
//! ```
//!
//! # Invocation lifecycle
//!
//! ```text
//! Received ─▶ Resolved ─▶ (FillerEmitted)? ─▶ Executing ─▶ Completed
//!    │                                            │
//!    └── unknown name ─▶ Failed(UNKNOWN_TOOL)     └── error/panic ─▶ Failed(HANDLER_FAILED)
//! ```
//!
//! # Filler policy
//!
//! The first declared filler is sent, and only when a [`FillerNotifier`] is
//! attached (the host supports asynchronous notification). Configuration may
//! replace a tool's filler list before registration.
//!
//! # Failure containment
//!
//! Handlers run on their own task so that a panic surfaces as a `JoinError`
//! instead of unwinding into the host. Failure responses carry fixed,
//! human-readable text; the underlying error only reaches the logs.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde_json::json;
use thiserror::Error;
use tokio::task::JoinHandle;
use toolrelay_application::ports::{
    filler::FillerNotifier,
    invocation_logger::{InvocationEvent, InvocationLogger, NoInvocationLogger},
    tool_dispatcher::ToolDispatcherPort,
    tool_handler::ToolHandler,
};
use toolrelay_domain::DomainError;
use toolrelay_domain::tool::{
    ArgumentIssue, ArgumentValidator, DefaultArgumentValidator,
    entities::{ToolCall, ToolCatalog},
    value_objects::{ToolError, ToolResponse},
};
use tracing::{debug, error, info, warn};

/// Text returned when the requested tool does not exist
pub const UNKNOWN_TOOL_TEXT: &str = "Sorry, I can't do that right now.";

/// Text returned when a handler fails or panics
pub const HANDLER_FAILED_TEXT: &str =
    "Something went wrong while handling that request. Please try again.";

/// Error raised while building a registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Catalog(#[from] DomainError),
}

/// Tool registry and dispatcher
pub struct ToolRegistry {
    /// Registered definitions
    catalog: ToolCatalog,
    /// Tool name -> handler
    handlers: HashMap<String, Arc<dyn ToolHandler>>,
    /// Filler lists replacing the handler's own, applied at registration
    filler_overrides: HashMap<String, Vec<String>>,
    /// Receiver of filler messages (None = host cannot take notifications)
    filler: Option<Arc<dyn FillerNotifier>>,
    /// Structured audit log
    logger: Arc<dyn InvocationLogger>,
    validator: DefaultArgumentValidator,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            catalog: ToolCatalog::new(),
            handlers: HashMap::new(),
            filler_overrides: HashMap::new(),
            filler: None,
            logger: Arc::new(NoInvocationLogger),
            validator: DefaultArgumentValidator,
        }
    }

    /// Attach a filler notifier
    pub fn with_filler_notifier(mut self, notifier: Arc<dyn FillerNotifier>) -> Self {
        self.filler = Some(notifier);
        self
    }

    /// Attach a structured invocation logger
    pub fn with_invocation_logger(mut self, logger: Arc<dyn InvocationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Replace filler lists for tools registered afterwards
    pub fn with_filler_overrides(mut self, overrides: HashMap<String, Vec<String>>) -> Self {
        self.filler_overrides = overrides;
        self
    }

    /// Register a tool handler
    pub fn register<H: ToolHandler + 'static>(self, handler: H) -> Result<Self, RegistryError> {
        self.register_arc(Arc::new(handler))
    }

    /// Register a tool handler (Arc version)
    pub fn register_arc(mut self, handler: Arc<dyn ToolHandler>) -> Result<Self, RegistryError> {
        let mut definition = handler.definition();
        if let Some(fillers) = self.filler_overrides.get(&definition.name) {
            definition = definition.with_fillers(fillers.iter().cloned());
        }

        let name = definition.name.clone();
        self.catalog.register(definition)?;
        debug!(tool = %name, "Registered tool");
        self.handlers.insert(name, handler);
        Ok(self)
    }

    /// Get statistics about registered tools
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            total_tools: self.catalog.len(),
            tools_with_fillers: self.catalog.all().filter(|t| t.filler().is_some()).count(),
        }
    }

    fn report_issues(tool: &str, issues: &[ArgumentIssue]) {
        for issue in issues {
            match issue {
                ArgumentIssue::MissingRequired { .. } => debug!(tool, "{}", issue),
                _ => warn!(tool, "{}", issue),
            }
        }
    }

    fn fail(&self, call: &ToolCall, text: &str, err: ToolError, start: Instant) -> ToolResponse {
        let duration_ms = start.elapsed().as_millis() as u64;
        self.logger.log(InvocationEvent::new(
            "tool_failed",
            json!({
                "tool": call.tool_name,
                "success": false,
                "code": err.code,
                "message": err.message,
                "duration_ms": duration_ms,
            }),
        ));
        ToolResponse::failed(&call.tool_name, text, err).with_duration(duration_ms)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Handler task that is aborted if the dispatch awaiting it is dropped
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Statistics about the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryStats {
    pub total_tools: usize,
    pub tools_with_fillers: usize,
}

#[async_trait]
impl ToolDispatcherPort for ToolRegistry {
    fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    async fn dispatch(&self, call: &ToolCall) -> ToolResponse {
        let start = Instant::now();
        debug!(tool = %call.tool_name, args = call.arguments.len(), "Received tool call");

        // Resolved
        let (Some(definition), Some(handler)) = (
            self.catalog.get(&call.tool_name),
            self.handlers.get(&call.tool_name),
        ) else {
            warn!(tool = %call.tool_name, "Unknown tool requested");
            return self.fail(
                call,
                UNKNOWN_TOOL_TEXT,
                ToolError::unknown_tool(&call.tool_name),
                start,
            );
        };

        let (call, issues) = self.validator.sanitize(call, definition);
        Self::report_issues(&definition.name, &issues);

        // FillerEmitted
        if let (Some(notifier), Some(text)) = (&self.filler, definition.filler()) {
            debug!(tool = %definition.name, filler = text, "Emitting filler");
            notifier.on_filler(&definition.name, text);
            self.logger.log(InvocationEvent::new(
                "filler_sent",
                json!({"tool": definition.name, "text": text}),
            ));
        }

        // Executing
        let handler = Arc::clone(handler);
        let task_call = call.clone();
        let mut task = AbortOnDrop(tokio::spawn(async move { handler.handle(&task_call).await }));
        let outcome = (&mut task.0).await;

        match outcome {
            Ok(Ok(result)) => {
                let duration_ms = start.elapsed().as_millis() as u64;
                info!(tool = %call.tool_name, duration_ms, "Tool completed");
                self.logger.log(InvocationEvent::new(
                    "tool_completed",
                    json!({"tool": call.tool_name, "success": true, "duration_ms": duration_ms}),
                ));
                ToolResponse::completed(&call.tool_name, result).with_duration(duration_ms)
            }
            Ok(Err(e)) => {
                warn!(tool = %call.tool_name, error = %e, "Tool handler failed");
                self.fail(
                    &call,
                    HANDLER_FAILED_TEXT,
                    ToolError::handler_failed(&call.tool_name),
                    start,
                )
            }
            Err(e) => {
                error!(tool = %call.tool_name, error = %e, "Tool handler panicked");
                self.fail(
                    &call,
                    HANDLER_FAILED_TEXT,
                    ToolError::handler_failed(&call.tool_name),
                    start,
                )
            }
        }
    }
}
