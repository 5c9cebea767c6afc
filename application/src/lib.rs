//! Application layer for toolrelay
//!
//! This crate contains port definitions, the services tool handlers build
//! on, and application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod services;

// Re-export commonly used types
pub use config::RuntimeParams;
pub use ports::{
    filler::FillerNotifier,
    invocation_logger::{InvocationEvent, InvocationLogger, NoInvocationLogger},
    service_status::{ServiceStatusPort, StatusError},
    tool_dispatcher::ToolDispatcherPort,
    tool_handler::{HandlerError, ToolHandler},
    warehouse::{ProbeError, WarehouseProbe},
};
pub use services::{
    FanOutAggregator, FanOutReport, GuardError, MemoStats, MemoTable, ProbeOutcome, ProbeResult,
    call_with_timeout,
};
