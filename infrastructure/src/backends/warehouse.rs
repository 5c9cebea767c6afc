//! Simulated warehouse backend
//!
//! Stands in for a remote inventory API: every check waits a fixed latency
//! and then answers from a static stock table.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use toolrelay_application::ports::warehouse::{ProbeError, WarehouseProbe};
use toolrelay_domain::StockTable;
use tracing::trace;

/// Default simulated latency per check
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct SimulatedWarehouse {
    stock: StockTable,
    latency: Duration,
    failing: HashSet<String>,
}

impl SimulatedWarehouse {
    pub fn new(stock: StockTable) -> Self {
        Self {
            stock,
            latency: DEFAULT_LATENCY,
            failing: HashSet::new(),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make every check against `warehouse` fail after the usual latency
    pub fn with_failing(mut self, warehouse: impl Into<String>) -> Self {
        self.failing.insert(warehouse.into());
        self
    }
}

impl Default for SimulatedWarehouse {
    fn default() -> Self {
        Self::new(StockTable::default())
    }
}

#[async_trait]
impl WarehouseProbe for SimulatedWarehouse {
    async fn check(&self, warehouse: &str) -> Result<u64, ProbeError> {
        tokio::time::sleep(self.latency).await;

        if self.failing.contains(warehouse) {
            return Err(ProbeError::Unavailable(warehouse.to_string()));
        }

        let count = self.stock.count_for(warehouse);
        trace!(warehouse, count, "warehouse check");
        Ok(count)
    }
}
