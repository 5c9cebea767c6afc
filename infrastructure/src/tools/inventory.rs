//! Inventory tool: check_inventory
//!
//! Asks every configured warehouse in parallel and reports the sum of the
//! answers that arrived before the deadline. Slow or failing warehouses
//! lower the total; they never fail the call.

use std::time::Duration;

use async_trait::async_trait;
use toolrelay_application::ports::tool_handler::{HandlerError, ToolHandler};
use toolrelay_application::services::fan_out::FanOutAggregator;
use toolrelay_domain::InventorySummary;
use toolrelay_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    value_objects::ToolResult,
};
use tracing::info;

pub const CHECK_INVENTORY: &str = "check_inventory";

pub fn check_inventory_definition() -> ToolDefinition {
    ToolDefinition::new(CHECK_INVENTORY, "Check stock for a SKU across all warehouses")
        .with_parameter(ToolParameter::new("sku", "Stock keeping unit", true))
        .with_filler("Checking all warehouses...")
        .with_filler("One moment...")
}

pub struct CheckInventoryTool {
    aggregator: FanOutAggregator,
    warehouses: Vec<String>,
    probe_timeout: Duration,
    overall_timeout: Duration,
}

impl CheckInventoryTool {
    pub fn new(aggregator: FanOutAggregator, warehouses: Vec<String>) -> Self {
        Self {
            aggregator,
            warehouses,
            probe_timeout: Duration::from_secs(2),
            overall_timeout: Duration::from_secs(2),
        }
    }

    pub fn with_timeouts(mut self, probe_timeout: Duration, overall_timeout: Duration) -> Self {
        self.probe_timeout = probe_timeout;
        self.overall_timeout = overall_timeout;
        self
    }
}

#[async_trait]
impl ToolHandler for CheckInventoryTool {
    fn definition(&self) -> ToolDefinition {
        check_inventory_definition()
    }

    async fn handle(&self, call: &ToolCall) -> Result<ToolResult, HandlerError> {
        let sku = call.string_or("sku", "unknown");
        let report = self
            .aggregator
            .aggregate_detailed(&self.warehouses, self.probe_timeout, self.overall_timeout)
            .await;

        let summary = InventorySummary {
            sku,
            total: report.total,
            warehouses_reporting: report.completed(),
            warehouses_queried: self.warehouses.len(),
        };

        if summary.is_partial() {
            info!(
                sku = %summary.sku,
                reporting = summary.warehouses_reporting,
                queried = summary.warehouses_queried,
                "Partial inventory total"
            );
        }

        Ok(ToolResult::new(summary.summary())
            .with_field("sku", summary.sku.clone())
            .with_field("total", summary.total)
            .with_field("warehouses_reporting", summary.warehouses_reporting))
    }
}
