//! Shipping pricing rules
//!
//! A destination zip code maps to a zone by its first character, and a zone
//! maps to a flat base rate. Weight adds a fixed amount per unit. Both
//! lookups are pure, which is what lets the handler layer memoize them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Zone used when a prefix has no mapping
pub const FALLBACK_ZONE: &str = "standard";
/// Rate used when a zone has no mapping
pub const FALLBACK_RATE: f64 = 14.99;
/// Prefix assumed for an empty zip code
pub const DEFAULT_ZIP_PREFIX: &str = "5";
/// Surcharge per unit of weight
pub const PER_WEIGHT_UNIT: f64 = 0.50;

/// Zone and rate tables plus the weight surcharge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingRules {
    /// Zip prefix (first character) → zone name
    pub zones: BTreeMap<String, String>,
    /// Zone name → base rate
    pub rates: BTreeMap<String, f64>,
    /// Prefix assumed when the zip code is empty
    pub default_prefix: String,
    /// Surcharge per unit of weight
    pub per_weight_unit: f64,
}

impl Default for ShippingRules {
    fn default() -> Self {
        let zones = [
            ("9", "west"),
            ("8", "west"),
            ("7", "central"),
            ("6", "central"),
            ("5", "central"),
            ("4", "central"),
            ("3", "east"),
            ("2", "east"),
            ("1", "east"),
            ("0", "east"),
        ]
        .into_iter()
        .map(|(prefix, zone)| (prefix.to_string(), zone.to_string()))
        .collect();

        let rates = [
            ("west", 9.99),
            ("central", 11.99),
            ("east", 12.99),
            (FALLBACK_ZONE, FALLBACK_RATE),
        ]
        .into_iter()
        .map(|(zone, rate)| (zone.to_string(), rate))
        .collect();

        Self {
            zones,
            rates,
            default_prefix: DEFAULT_ZIP_PREFIX.to_string(),
            per_weight_unit: PER_WEIGHT_UNIT,
        }
    }
}

impl ShippingRules {
    /// First character of the zip code, or the default prefix when empty
    pub fn zip_prefix(&self, zip_code: &str) -> String {
        zip_code
            .chars()
            .next()
            .map(String::from)
            .unwrap_or_else(|| self.default_prefix.clone())
    }

    pub fn zone_for_prefix(&self, prefix: &str) -> String {
        self.zones
            .get(prefix)
            .cloned()
            .unwrap_or_else(|| FALLBACK_ZONE.to_string())
    }

    pub fn rate_for_zone(&self, zone: &str) -> f64 {
        self.rates.get(zone).copied().unwrap_or(FALLBACK_RATE)
    }

    /// Build a quote from an already resolved zone and base rate
    pub fn quote(
        &self,
        zip_code: &str,
        zone: String,
        base_rate: f64,
        weight: f64,
    ) -> ShippingQuote {
        let total = round_cents(base_rate + weight * self.per_weight_unit);
        ShippingQuote {
            zip_code: zip_code.to_string(),
            zone,
            base_rate,
            weight,
            total,
        }
    }
}

/// Priced shipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingQuote {
    pub zip_code: String,
    pub zone: String,
    pub base_rate: f64,
    pub weight: f64,
    /// Total cost, rounded to cents
    pub total: f64,
}

impl ShippingQuote {
    pub fn summary(&self) -> String {
        format!(
            "Shipping to {} ({} zone): ${:.2}",
            self.zip_code, self.zone, self.total
        )
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_lookup() {
        let rules = ShippingRules::default();
        assert_eq!(rules.zone_for_prefix("9"), "west");
        assert_eq!(rules.zone_for_prefix("6"), "central");
        assert_eq!(rules.zone_for_prefix("0"), "east");
        assert_eq!(rules.zone_for_prefix("Z"), FALLBACK_ZONE);
    }

    #[test]
    fn test_rate_lookup() {
        let rules = ShippingRules::default();
        assert_eq!(rules.rate_for_zone("west"), 9.99);
        assert_eq!(rules.rate_for_zone("east"), 12.99);
        assert_eq!(rules.rate_for_zone("lunar"), FALLBACK_RATE);
    }

    #[test]
    fn test_zip_prefix() {
        let rules = ShippingRules::default();
        assert_eq!(rules.zip_prefix("90210"), "9");
        assert_eq!(rules.zip_prefix(""), "5");
        // Leading whitespace is not stripped and lands in the fallback zone
        assert_eq!(rules.zip_prefix(" 10001"), " ");
        assert_eq!(rules.zone_for_prefix(&rules.zip_prefix(" 10001")), FALLBACK_ZONE);
    }

    #[test]
    fn test_quote_west_two_pounds() {
        let rules = ShippingRules::default();
        let quote = rules.quote("90210", "west".to_string(), 9.99, 2.0);

        assert!((quote.total - 10.99).abs() < 1e-9);
        assert_eq!(quote.summary(), "Shipping to 90210 (west zone): $10.99");
    }

    #[test]
    fn test_rules_deserialize_partial() {
        let rules: ShippingRules = serde_json::from_str(r#"{"per_weight_unit": 1.25}"#).unwrap();
        assert_eq!(rules.per_weight_unit, 1.25);
        assert_eq!(rules.zone_for_prefix("8"), "west");
    }
}
