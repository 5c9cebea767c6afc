//! Inventory stock tables and summaries

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-warehouse stock counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockTable(BTreeMap<String, u64>);

impl Default for StockTable {
    fn default() -> Self {
        Self::from_iter([("A", 10), ("B", 5), ("C", 15)])
    }
}

impl StockTable {
    /// Stock held by a warehouse; unknown warehouses hold nothing
    pub fn count_for(&self, warehouse: &str) -> u64 {
        self.0.get(warehouse).copied().unwrap_or(0)
    }

    pub fn warehouses(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|s| s.as_str())
    }

    /// Sum over every known warehouse
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for StockTable {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Aggregated stock for one SKU across warehouses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub sku: String,
    pub total: u64,
    /// Warehouses whose answer was counted
    pub warehouses_reporting: usize,
    /// Warehouses that were asked
    pub warehouses_queried: usize,
}

impl InventorySummary {
    pub fn is_partial(&self) -> bool {
        self.warehouses_reporting < self.warehouses_queried
    }

    pub fn summary(&self) -> String {
        format!("Inventory for {}: {} total", self.sku, self.total)
    }
}
