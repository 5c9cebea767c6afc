//! End-to-end dispatch through the full catalog

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use toolrelay_application::{FillerNotifier, ServiceStatusPort, StatusError, ToolDispatcherPort};
use toolrelay_domain::tool::value_objects::{HANDLER_FAILED, UNKNOWN_TOOL};
use toolrelay_domain::{ShippingRules, ToolCall};
use toolrelay_infrastructure::config::FileConfig;
use toolrelay_infrastructure::{CatalogDeps, SimulatedWarehouse, ToolRegistry, build_registry};

struct AlwaysOnline;

#[async_trait]
impl ServiceStatusPort for AlwaysOnline {
    fn service_name(&self) -> &str {
        "always-online"
    }

    async fn check(&self) -> Result<(), StatusError> {
        Ok(())
    }
}

#[derive(Default)]
struct CollectingFiller(Mutex<Vec<String>>);

impl FillerNotifier for CollectingFiller {
    fn on_filler(&self, _tool_name: &str, text: &str) {
        self.0.lock().unwrap().push(text.to_string());
    }
}

fn deps(warehouse: SimulatedWarehouse) -> CatalogDeps {
    CatalogDeps {
        probe: Arc::new(warehouse),
        status: Arc::new(AlwaysOnline),
        warehouses: ["A", "B", "C"].map(String::from).to_vec(),
        shipping: ShippingRules::default(),
        params: FileConfig::default().to_runtime_params(),
    }
}

fn registry(warehouse: SimulatedWarehouse) -> ToolRegistry {
    build_registry(ToolRegistry::new(), deps(warehouse)).unwrap()
}

#[tokio::test(start_paused = true)]
async fn inventory_sums_all_warehouses() {
    let registry = registry(SimulatedWarehouse::default());
    let start = tokio::time::Instant::now();

    let response = registry
        .dispatch(&ToolCall::new("check_inventory").with_arg("sku", "WIDGET-1"))
        .await;

    assert!(response.is_success());
    assert_eq!(response.text, "Inventory for WIDGET-1: 30 total");
    // Probes run in parallel: one latency, not three
    assert!(start.elapsed() < Duration::from_millis(600));
}

#[tokio::test(start_paused = true)]
async fn inventory_skips_failing_warehouse() {
    let registry = registry(SimulatedWarehouse::default().with_failing("A"));

    let response = registry
        .dispatch(&ToolCall::new("check_inventory").with_arg("sku", "WIDGET-1"))
        .await;

    assert!(response.is_success());
    assert_eq!(response.structured_data.unwrap()["total"], 20);
}

#[tokio::test]
async fn shipping_quote_for_west_coast() {
    let registry = registry(SimulatedWarehouse::default());

    let call = ToolCall::new("calculate_shipping")
        .with_arg("zip_code", "90210")
        .with_arg("weight", 2.0);
    let response = registry.dispatch(&call).await;

    assert!(response.is_success());
    assert_eq!(response.text, "Shipping to 90210 (west zone): $10.99");
    let data = response.structured_data.unwrap();
    assert_eq!(data["zone"], "west");
    assert_eq!(data["total"], 10.99);
}

#[tokio::test]
async fn unknown_tool_is_structured_failure() {
    let registry = registry(SimulatedWarehouse::default());

    let response = registry.dispatch(&ToolCall::new("book_flight")).await;

    assert!(!response.is_success());
    assert_eq!(response.error().unwrap().code, UNKNOWN_TOOL);
    assert!(!response.text.is_empty());
    assert!(!response.text.contains("book_flight"));
}

#[tokio::test]
async fn repeated_dispatch_is_stable() {
    let registry = registry(SimulatedWarehouse::default());
    let call = ToolCall::new("get_shipping_zone").with_arg("zip_code", "10001");

    let first = registry.dispatch(&call).await;
    let second = registry.dispatch(&call).await;

    assert_eq!(first.text, "Zip 10001 is in east zone");
    assert_eq!(first.text, second.text);
    assert_eq!(first.structured_data, second.structured_data);
}

#[tokio::test]
async fn external_service_online() {
    let registry = registry(SimulatedWarehouse::default());

    let response = registry.dispatch(&ToolCall::new("check_external_service")).await;

    assert!(response.is_success());
    assert_eq!(response.text, "External service: Online");
}

#[tokio::test(start_paused = true)]
async fn first_filler_is_emitted_once_per_call() {
    let filler = Arc::new(CollectingFiller::default());
    let registry = build_registry(
        ToolRegistry::new().with_filler_notifier(filler.clone()),
        deps(SimulatedWarehouse::default()),
    )
    .unwrap();

    registry
        .dispatch(&ToolCall::new("get_product").with_arg("product_id", "W-1"))
        .await;
    registry
        .dispatch(&ToolCall::new("get_shipping_zone").with_arg("zip_code", "60601"))
        .await;
    registry
        .dispatch(&ToolCall::new("check_inventory").with_arg("sku", "X"))
        .await;

    assert_eq!(
        *filler.0.lock().unwrap(),
        vec!["Looking that up...", "Checking all warehouses..."]
    );
}

#[tokio::test]
async fn malformed_arguments_fall_back_to_defaults() {
    let registry = registry(SimulatedWarehouse::default());

    let call = ToolCall::new("calculate_shipping")
        .with_arg("zip_code", 90210)
        .with_arg("weight", "heavy");
    let response = registry.dispatch(&call).await;

    assert!(response.is_success());
    assert_eq!(response.text, "Shipping to 50000 (central zone): $12.49");
    assert!(response.error().map(|e| e.code != HANDLER_FAILED).unwrap_or(true));
}
