//! Warehouse backend configuration from TOML (`[warehouses]` section)

use serde::{Deserialize, Serialize};
use toolrelay_domain::StockTable;

/// Raw warehouse configuration from TOML
///
/// ```toml
/// [warehouses]
/// ids = ["A", "B", "C"]
/// latency_ms = 300
/// failing = ["B"]
///
/// [warehouses.inventory]
/// A = 10
/// B = 5
/// C = 15
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWarehousesConfig {
    /// Warehouses queried by `check_inventory`, in order
    pub ids: Vec<String>,
    /// Simulated latency of each probe
    pub latency_ms: u64,
    /// Stock per warehouse
    pub inventory: StockTable,
    /// Warehouses that always fail (fault drills)
    pub failing: Vec<String>,
}

impl Default for FileWarehousesConfig {
    fn default() -> Self {
        let inventory = StockTable::default();
        Self {
            ids: inventory.warehouses().map(String::from).collect(),
            latency_ms: 300,
            inventory,
            failing: Vec::new(),
        }
    }
}
