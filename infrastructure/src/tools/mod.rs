//! Tool implementations for the agent host
//!
//! This module provides the [`ToolRegistry`] dispatcher and the catalog
//! tools it serves.
//!
//! ## Catalog
//!
//! | Tool | Backend |
//! |------|---------|
//! | `get_product` | simulated lookup |
//! | `check_inventory` | warehouse fan-out |
//! | `calculate_shipping` | memoized zone/rate tables |
//! | `get_shipping_zone` | memoized zone table |
//! | `check_external_service` | guarded HTTP status check |

pub mod inventory;
pub mod product;
pub mod service_status;
pub mod shipping;

mod registry;

pub use inventory::CheckInventoryTool;
pub use product::GetProductTool;
pub use registry::{
    HANDLER_FAILED_TEXT, RegistryError, RegistryStats, ToolRegistry, UNKNOWN_TOOL_TEXT,
};
pub use service_status::CheckExternalServiceTool;
pub use shipping::{CalculateShippingTool, GetShippingZoneTool, ShippingLookups};

use std::sync::Arc;
use std::time::Duration;

use toolrelay_application::RuntimeParams;
use toolrelay_application::ports::{service_status::ServiceStatusPort, warehouse::WarehouseProbe};
use toolrelay_application::services::fan_out::FanOutAggregator;
use toolrelay_domain::ShippingRules;

use crate::backends::{HttpStatusCheck, SimulatedWarehouse};
use crate::config::FileConfig;

/// Backends and parameters the catalog tools are built from
#[derive(Clone)]
pub struct CatalogDeps {
    pub probe: Arc<dyn WarehouseProbe>,
    pub status: Arc<dyn ServiceStatusPort>,
    /// Warehouses queried by `check_inventory`, in order
    pub warehouses: Vec<String>,
    pub shipping: ShippingRules,
    pub params: RuntimeParams,
}

impl CatalogDeps {
    /// Build the default backends described by a loaded configuration
    pub fn from_config(config: &FileConfig) -> Result<Self, reqwest::Error> {
        let warehouse = config.warehouses.failing.iter().fold(
            SimulatedWarehouse::new(config.warehouses.inventory.clone())
                .with_latency(Duration::from_millis(config.warehouses.latency_ms)),
            |warehouse, id| warehouse.with_failing(id.clone()),
        );
        let status = HttpStatusCheck::new(config.external_service.url.clone())?;

        Ok(Self {
            probe: Arc::new(warehouse),
            status: Arc::new(status),
            warehouses: config.warehouses.ids.clone(),
            shipping: config.shipping.clone(),
            params: config.to_runtime_params(),
        })
    }
}

/// Register the full catalog on `registry`
///
/// The registry's filler overrides and notifiers must already be set.
pub fn build_registry(
    registry: ToolRegistry,
    deps: CatalogDeps,
) -> Result<ToolRegistry, RegistryError> {
    let params = deps.params;
    let lookups = Arc::new(ShippingLookups::new(deps.shipping, params.cache_capacity));
    let inventory = CheckInventoryTool::new(FanOutAggregator::new(deps.probe), deps.warehouses)
        .with_timeouts(params.probe_timeout, params.aggregate_timeout);

    registry
        .register(GetProductTool::new(params.lookup_latency))?
        .register(inventory)?
        .register(CalculateShippingTool::new(Arc::clone(&lookups)))?
        .register(GetShippingZoneTool::new(lookups))?
        .register(CheckExternalServiceTool::new(deps.status, params.external_timeout))
}
