//! Runtime parameters: deadlines and bounds for tool execution.
//!
//! [`RuntimeParams`] groups the static values the handler layer needs:
//! fan-out deadlines, the external call deadline, memo table capacity and
//! the simulated catalog lookup latency. They are supplied once at startup
//! from the configuration file and never computed by the core.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::services::memo::DEFAULT_CAPACITY;

/// Deadlines and bounds for tool execution.
///
/// | Field | Used by | Default |
/// |-------|---------|---------|
/// | `probe_timeout` | each warehouse probe | 2s |
/// | `aggregate_timeout` | whole inventory fan-out | 2s |
/// | `external_timeout` | external service check | 2s |
/// | `cache_capacity` | shipping memo tables | 100 |
/// | `lookup_latency` | product lookup | 300ms |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeParams {
    /// Deadline for a single warehouse probe.
    pub probe_timeout: Duration,
    /// Deadline for the whole fan-out; partial sums are returned past it.
    pub aggregate_timeout: Duration,
    /// Deadline for the external service status check.
    pub external_timeout: Duration,
    /// Maximum entries per memo table.
    pub cache_capacity: usize,
    /// Simulated latency of the product catalog lookup.
    pub lookup_latency: Duration,
}

impl Default for RuntimeParams {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_secs(2),
            aggregate_timeout: Duration::from_secs(2),
            external_timeout: Duration::from_secs(2),
            cache_capacity: DEFAULT_CAPACITY,
            lookup_latency: Duration::from_millis(300),
        }
    }
}

impl RuntimeParams {
    // ==================== Builder Methods ====================

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn with_aggregate_timeout(mut self, timeout: Duration) -> Self {
        self.aggregate_timeout = timeout;
        self
    }

    pub fn with_external_timeout(mut self, timeout: Duration) -> Self {
        self.external_timeout = timeout;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn with_lookup_latency(mut self, latency: Duration) -> Self {
        self.lookup_latency = latency;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = RuntimeParams::default();
        assert_eq!(params.aggregate_timeout, Duration::from_secs(2));
        assert_eq!(params.external_timeout, Duration::from_secs(2));
        assert_eq!(params.cache_capacity, 100);
        assert_eq!(params.lookup_latency, Duration::from_millis(300));
    }

    #[test]
    fn test_builder() {
        let params = RuntimeParams::default()
            .with_aggregate_timeout(Duration::from_millis(50))
            .with_cache_capacity(4)
            .with_lookup_latency(Duration::ZERO);

        assert_eq!(params.aggregate_timeout, Duration::from_millis(50));
        assert_eq!(params.cache_capacity, 4);
        assert_eq!(params.lookup_latency, Duration::ZERO);
    }
}
