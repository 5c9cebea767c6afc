//! Product lookup tool: get_product

use std::time::Duration;

use async_trait::async_trait;
use toolrelay_application::ports::tool_handler::{HandlerError, ToolHandler};
use toolrelay_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    value_objects::ToolResult,
};

pub const GET_PRODUCT: &str = "get_product";

/// Name and price reported for every product in the demo catalog
const PRODUCT_NAME: &str = "Widget Pro";
const PRODUCT_PRICE: f64 = 99.99;

pub fn get_product_definition() -> ToolDefinition {
    ToolDefinition::new(GET_PRODUCT, "Look up product details by product id")
        .with_parameter(ToolParameter::new("product_id", "Product identifier", true))
        .with_filler("Looking that up...")
        .with_filler("Checking our catalog...")
}

/// Catalog lookup with a fixed simulated latency
#[derive(Debug, Clone)]
pub struct GetProductTool {
    latency: Duration,
}

impl GetProductTool {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl ToolHandler for GetProductTool {
    fn definition(&self) -> ToolDefinition {
        get_product_definition()
    }

    async fn handle(&self, call: &ToolCall) -> Result<ToolResult, HandlerError> {
        let product_id = call.string_or("product_id", "unknown");
        tokio::time::sleep(self.latency).await;

        Ok(ToolResult::new(format!(
            "Product {}: {}, ${:.2}",
            product_id, PRODUCT_NAME, PRODUCT_PRICE
        ))
        .with_field("product_id", product_id)
        .with_field("name", PRODUCT_NAME)
        .with_field("price", PRODUCT_PRICE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_get_product() {
        let tool = GetProductTool::new(Duration::from_millis(300));
        let start = Instant::now();
        let result = tool
            .handle(&ToolCall::new(GET_PRODUCT).with_arg("product_id", "W-1"))
            .await
            .unwrap();

        assert_eq!(result.text, "Product W-1: Widget Pro, $99.99");
        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_get_product_default_id() {
        let tool = GetProductTool::new(Duration::ZERO);
        let result = tool.handle(&ToolCall::new(GET_PRODUCT)).await.unwrap();

        assert_eq!(result.text, "Product unknown: Widget Pro, $99.99");
        assert_eq!(result.structured_data.unwrap()["price"], 99.99);
    }
}
