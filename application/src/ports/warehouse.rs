//! Warehouse probe port
//!
//! One probe is a single slow call to one warehouse backend. Probes have no
//! concurrency of their own; the fan-out aggregator runs them in parallel.

use async_trait::async_trait;
use thiserror::Error;

/// Error from a single warehouse probe
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProbeError {
    #[error("Warehouse {0} is unavailable")]
    Unavailable(String),

    #[error("Warehouse {0} timed out")]
    Timeout(String),

    #[error("Warehouse {0} probe panicked")]
    Panicked(String),
}

/// Port for querying stock at one warehouse
#[async_trait]
pub trait WarehouseProbe: Send + Sync {
    /// Stock count at `warehouse`; unknown warehouses report 0
    async fn check(&self, warehouse: &str) -> Result<u64, ProbeError>;
}
