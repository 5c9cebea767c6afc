//! Application-level configuration.
//!
//! - [`RuntimeParams`]: deadlines, cache bound and simulated latencies

pub mod runtime_params;

pub use runtime_params::RuntimeParams;
