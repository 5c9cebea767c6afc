//! Memo table configuration from TOML (`[cache]` section)

use serde::{Deserialize, Serialize};
use toolrelay_application::services::memo::DEFAULT_CAPACITY;

/// Raw cache configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCacheConfig {
    /// Maximum entries per memo table
    pub capacity: usize,
}

impl Default for FileCacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}
