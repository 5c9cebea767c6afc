//! Tool domain module
//!
//! This module defines the core abstractions of the **tool catalog** that a
//! conversational agent host calls into.
//!
//! # Overview
//!
//! Every tool is described by a [`ToolDefinition`] (name, parameters, filler
//! messages), invoked via a [`ToolCall`], and answered with a [`ToolResponse`]
//! built from the handler's [`ToolResult`].
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolCatalog  │───▶│ ToolCall     │───▶│ ToolResult   │───▶│ ToolResponse │
//! │ (registry)   │    │ (invocation) │    │ (handler)    │    │ (host)       │
//! └──────────────┘    └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! # Arguments
//!
//! Host arguments are dynamic ([`serde_json::Value`]). The
//! [`ArgumentValidator`] only checks shape; it never rejects a call. Handlers
//! read arguments through [`ToolCall::string_or`] / [`ToolCall::f64_or`] and
//! always see a fully defaulted set of values.
//!
//! # Architecture
//!
//! - **Domain** (this module): Pure definitions, no I/O
//! - **Application** (`ToolHandler`, `ToolDispatcherPort`): async ports
//! - **Infrastructure** (`ToolRegistry`): dispatch, filler emission, catalog tools

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{ParamType, ToolCall, ToolCatalog, ToolDefinition, ToolParameter};
pub use traits::{ArgumentIssue, ArgumentValidator, DefaultArgumentValidator};
pub use value_objects::{ToolError, ToolResponse, ToolResult};
