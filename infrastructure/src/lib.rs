//! Infrastructure layer for toolrelay
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, the tool registry and catalog tools, and
//! configuration file loading.

pub mod backends;
pub mod config;
pub mod logging;
pub mod tools;

// Re-export commonly used types
pub use backends::{HttpStatusCheck, SimulatedWarehouse};
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use logging::JsonlInvocationLogger;
pub use tools::{CatalogDeps, RegistryError, ToolRegistry, build_registry};
