//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod cache;
mod catalog;
mod external;
mod logging;
mod timeouts;
mod warehouses;

pub use cache::FileCacheConfig;
pub use catalog::FileCatalogConfig;
pub use external::{DEFAULT_STATUS_URL, FileExternalServiceConfig};
pub use logging::FileLoggingConfig;
pub use timeouts::FileTimeoutsConfig;
pub use warehouses::FileWarehousesConfig;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use toolrelay_application::RuntimeParams;
use toolrelay_domain::ShippingRules;

/// Configuration validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("{0} cannot be 0")]
    ZeroTimeout(&'static str),

    #[error("cache.capacity cannot be 0")]
    ZeroCapacity,

    #[error("warehouse ids cannot be empty strings")]
    EmptyWarehouseId,

    #[error("external_service.url cannot be empty")]
    EmptyServiceUrl,

    #[error("shipping.per_weight_unit must be a non-negative number")]
    InvalidWeightRate,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Deadlines
    pub timeouts: FileTimeoutsConfig,
    /// Memo table bound
    pub cache: FileCacheConfig,
    /// Warehouse backends for the inventory fan-out
    pub warehouses: FileWarehousesConfig,
    /// Catalog latency and filler overrides
    pub catalog: FileCatalogConfig,
    /// Zone and rate tables (uses the domain type)
    pub shipping: ShippingRules,
    /// External service probed by the status check
    pub external_service: FileExternalServiceConfig,
    /// Structured invocation log
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let timeouts = [
            ("timeouts.probe_ms", self.timeouts.probe_ms),
            ("timeouts.aggregate_ms", self.timeouts.aggregate_ms),
            ("timeouts.external_ms", self.timeouts.external_ms),
        ];
        if let Some((field, _)) = timeouts.iter().find(|(_, ms)| *ms == 0) {
            return Err(ConfigValidationError::ZeroTimeout(*field));
        }

        if self.cache.capacity == 0 {
            return Err(ConfigValidationError::ZeroCapacity);
        }

        if self.warehouses.ids.iter().any(|id| id.trim().is_empty()) {
            return Err(ConfigValidationError::EmptyWarehouseId);
        }

        if self.external_service.url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyServiceUrl);
        }

        let rate = self.shipping.per_weight_unit;
        if !rate.is_finite() || rate < 0.0 {
            return Err(ConfigValidationError::InvalidWeightRate);
        }

        Ok(())
    }

    /// Convert to application-layer runtime parameters
    pub fn to_runtime_params(&self) -> RuntimeParams {
        RuntimeParams::default()
            .with_probe_timeout(Duration::from_millis(self.timeouts.probe_ms))
            .with_aggregate_timeout(Duration::from_millis(self.timeouts.aggregate_ms))
            .with_external_timeout(Duration::from_millis(self.timeouts.external_ms))
            .with_cache_capacity(self.cache.capacity)
            .with_lookup_latency(Duration::from_millis(self.catalog.lookup_latency_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.warehouses.ids, vec!["A", "B", "C"]);
        assert_eq!(config.warehouses.latency_ms, 300);
        assert_eq!(config.cache.capacity, 100);
        assert_eq!(config.external_service.url, DEFAULT_STATUS_URL);
        assert!(config.logging.invocation_log.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let toml_str = r#"
[timeouts]
aggregate_ms = 500

[warehouses]
ids = ["A", "B"]
failing = ["B"]
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.timeouts.aggregate_ms, 500);
        assert_eq!(config.timeouts.probe_ms, 2_000);
        assert_eq!(config.warehouses.ids, vec!["A", "B"]);
        assert_eq!(config.warehouses.failing, vec!["B"]);
        assert_eq!(config.warehouses.inventory.count_for("C"), 15);
    }

    #[test]
    fn test_shipping_and_fillers_deserialize() {
        let toml_str = r#"
[shipping]
per_weight_unit = 0.75

[shipping.rates]
west = 8.5

[catalog.fillers]
get_product = []
check_inventory = ["Hang on..."]
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.shipping.per_weight_unit, 0.75);
        assert_eq!(config.shipping.rate_for_zone("west"), 8.5);
        // Replacing the rate table drops the other built-in rates
        assert_eq!(config.shipping.rate_for_zone("east"), 14.99);
        assert_eq!(config.catalog.fillers["get_product"], Vec::<String>::new());
        assert_eq!(config.catalog.fillers["check_inventory"], vec!["Hang on..."]);
    }

    #[test]
    fn test_validate_zero_timeout() {
        let toml_str = r#"
[timeouts]
external_ms = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::ZeroTimeout("timeouts.external_ms"))
        );
    }

    #[test]
    fn test_validate_zero_capacity() {
        let mut config = FileConfig::default();
        config.cache.capacity = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::ZeroCapacity));
    }

    #[test]
    fn test_validate_empty_warehouse_id() {
        let mut config = FileConfig::default();
        config.warehouses.ids.push(" ".to_string());
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyWarehouseId));
    }

    #[test]
    fn test_validate_negative_weight_rate() {
        let mut config = FileConfig::default();
        config.shipping.per_weight_unit = -1.0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidWeightRate));
    }

    #[test]
    fn test_to_runtime_params() {
        let toml_str = r#"
[timeouts]
probe_ms = 100
aggregate_ms = 250

[cache]
capacity = 8

[catalog]
lookup_latency_ms = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let params = config.to_runtime_params();

        assert_eq!(params.probe_timeout, Duration::from_millis(100));
        assert_eq!(params.aggregate_timeout, Duration::from_millis(250));
        assert_eq!(params.external_timeout, Duration::from_secs(2));
        assert_eq!(params.cache_capacity, 8);
        assert_eq!(params.lookup_latency, Duration::ZERO);
    }
}
