//! Catalog configuration from TOML (`[catalog]` section)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw catalog configuration from TOML
///
/// `fillers` replaces the built-in filler list of a tool; an empty list
/// silences it.
///
/// ```toml
/// [catalog]
/// lookup_latency_ms = 300
///
/// [catalog.fillers]
/// check_inventory = ["Let me check every warehouse..."]
/// get_product = []
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCatalogConfig {
    /// Simulated latency of the product lookup
    pub lookup_latency_ms: u64,
    /// Per-tool filler overrides
    pub fillers: HashMap<String, Vec<String>>,
}

impl Default for FileCatalogConfig {
    fn default() -> Self {
        Self {
            lookup_latency_ms: 300,
            fillers: HashMap::new(),
        }
    }
}
