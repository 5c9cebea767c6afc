//! Deadline configuration from TOML (`[timeouts]` section)

use serde::{Deserialize, Serialize};

/// Raw timeout configuration, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTimeoutsConfig {
    /// Deadline for a single warehouse probe
    pub probe_ms: u64,
    /// Deadline for the whole inventory fan-out
    pub aggregate_ms: u64,
    /// Deadline for the external service check
    pub external_ms: u64,
}

impl Default for FileTimeoutsConfig {
    fn default() -> Self {
        Self {
            probe_ms: 2_000,
            aggregate_ms: 2_000,
            external_ms: 2_000,
        }
    }
}
