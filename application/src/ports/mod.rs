//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod filler;
pub mod invocation_logger;
pub mod service_status;
pub mod tool_dispatcher;
pub mod tool_handler;
pub mod warehouse;
