//! Domain layer for toolrelay
//!
//! This crate contains the tool catalog entities, argument handling and the
//! pure pricing/stock rules behind the catalog tools. It has no dependencies
//! on async runtimes, I/O or configuration loading.
//!
//! # Core Concepts
//!
//! - **Tool catalog**: named operations with a parameter schema and optional
//!   filler messages ([`ToolDefinition`], [`ToolCatalog`])
//! - **Invocation**: a [`ToolCall`] with dynamic arguments, answered by a
//!   [`ToolResponse`] that never exposes raw errors
//! - **Rules**: [`ShippingRules`] and [`StockTable`], the lookup tables the
//!   catalog tools consult

pub mod core;
pub mod inventory;
pub mod shipping;
pub mod tool;

// Re-export commonly used types
pub use core::error::DomainError;
pub use inventory::{InventorySummary, StockTable};
pub use shipping::{ShippingQuote, ShippingRules};
pub use tool::{
    entities::{ParamType, ToolCall, ToolCatalog, ToolDefinition, ToolParameter},
    traits::{ArgumentIssue, ArgumentValidator, DefaultArgumentValidator},
    value_objects::{ToolError, ToolResponse, ToolResult},
};
