//! Shipping tools: calculate_shipping, get_shipping_zone
//!
//! Both tools share one [`ShippingLookups`], whose zone and rate tables are
//! memoized so repeated quotes for the same region skip the lookups.

use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use toolrelay_application::ports::tool_handler::{HandlerError, ToolHandler};
use toolrelay_application::services::memo::{MemoStats, MemoTable};
use toolrelay_domain::shipping::{ShippingQuote, ShippingRules};
use toolrelay_domain::tool::{
    entities::{ParamType, ToolCall, ToolDefinition, ToolParameter},
    value_objects::ToolResult,
};

pub const CALCULATE_SHIPPING: &str = "calculate_shipping";
pub const GET_SHIPPING_ZONE: &str = "get_shipping_zone";

const DEFAULT_ZIP: &str = "50000";
const DEFAULT_WEIGHT: f64 = 1.0;

pub fn calculate_shipping_definition() -> ToolDefinition {
    ToolDefinition::new(CALCULATE_SHIPPING, "Calculate shipping cost to a zip code")
        .with_parameter(ToolParameter::new("zip_code", "Destination zip code", true))
        .with_parameter(
            ToolParameter::new("weight", "Package weight in pounds", true)
                .with_type(ParamType::Number),
        )
        .with_filler("Calculating shipping...")
}

pub fn get_shipping_zone_definition() -> ToolDefinition {
    ToolDefinition::new(GET_SHIPPING_ZONE, "Get the shipping zone for a zip code")
        .with_parameter(ToolParameter::new("zip_code", "Zip code", true))
}

/// Zone and rate lookups with memoization
pub struct ShippingLookups {
    rules: ShippingRules,
    zones: MemoTable<String, String>,
    rates: MemoTable<String, f64>,
}

impl ShippingLookups {
    pub fn new(rules: ShippingRules, capacity: usize) -> Self {
        Self {
            rules,
            zones: MemoTable::new("shipping_zones", capacity),
            rates: MemoTable::new("shipping_rates", capacity),
        }
    }

    pub async fn zone_for(&self, zip_code: &str) -> String {
        let prefix = self.rules.zip_prefix(zip_code);
        let rules = &self.rules;
        match self
            .zones
            .get(prefix, |p| Ok::<_, Infallible>(rules.zone_for_prefix(p)))
            .await
        {
            Ok(zone) => zone,
            Err(never) => match never {},
        }
    }

    pub async fn rate_for(&self, zone: &str) -> f64 {
        let rules = &self.rules;
        match self
            .rates
            .get(zone.to_string(), |z| Ok::<_, Infallible>(rules.rate_for_zone(z)))
            .await
        {
            Ok(rate) => rate,
            Err(never) => match never {},
        }
    }

    pub async fn quote(&self, zip_code: &str, weight: f64) -> ShippingQuote {
        let zone = self.zone_for(zip_code).await;
        let base_rate = self.rate_for(&zone).await;
        self.rules.quote(zip_code, zone, base_rate, weight)
    }

    /// Hit/miss counters for the (zone, rate) tables
    pub fn stats(&self) -> (MemoStats, MemoStats) {
        (self.zones.stats(), self.rates.stats())
    }
}

impl Default for ShippingLookups {
    fn default() -> Self {
        Self::new(ShippingRules::default(), 100)
    }
}

/// Weight argument, falling back to the default for negative or missing values
fn weight_arg(call: &ToolCall) -> f64 {
    let weight = call.f64_or("weight", DEFAULT_WEIGHT);
    if weight < 0.0 { DEFAULT_WEIGHT } else { weight }
}

pub struct CalculateShippingTool {
    lookups: Arc<ShippingLookups>,
}

impl CalculateShippingTool {
    pub fn new(lookups: Arc<ShippingLookups>) -> Self {
        Self { lookups }
    }
}

#[async_trait]
impl ToolHandler for CalculateShippingTool {
    fn definition(&self) -> ToolDefinition {
        calculate_shipping_definition()
    }

    async fn handle(&self, call: &ToolCall) -> Result<ToolResult, HandlerError> {
        let zip_code = call.string_or("zip_code", DEFAULT_ZIP);
        let quote = self.lookups.quote(&zip_code, weight_arg(call)).await;

        Ok(ToolResult::new(quote.summary())
            .with_field("zone", quote.zone.clone())
            .with_field("base_rate", quote.base_rate)
            .with_field("total", quote.total))
    }
}

pub struct GetShippingZoneTool {
    lookups: Arc<ShippingLookups>,
}

impl GetShippingZoneTool {
    pub fn new(lookups: Arc<ShippingLookups>) -> Self {
        Self { lookups }
    }
}

#[async_trait]
impl ToolHandler for GetShippingZoneTool {
    fn definition(&self) -> ToolDefinition {
        get_shipping_zone_definition()
    }

    async fn handle(&self, call: &ToolCall) -> Result<ToolResult, HandlerError> {
        let zip_code = call.string_or("zip_code", DEFAULT_ZIP);
        let zone = self.lookups.zone_for(&zip_code).await;

        Ok(ToolResult::new(format!("Zip {} is in {} zone", zip_code, zone))
            .with_field("zone", zone))
    }
}
