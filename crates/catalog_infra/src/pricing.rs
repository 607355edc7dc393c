//! Static on-demand price table.

use std::collections::HashMap;

use serde::Deserialize;

use catalog_core::upstream::{PriceLookup, PricingError};

/// Per-hour on-demand prices keyed by shape name.
///
/// Deserializes from a flat JSON object: `{"m5.large": 0.096, ...}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct StaticPriceTable {
    prices: HashMap<String, f64>,
}

impl StaticPriceTable {
    pub fn new<I, K>(prices: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            prices: prices.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn insert(&mut self, shape: impl Into<String>, price: f64) {
        self.prices.insert(shape.into(), price);
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl PriceLookup for StaticPriceTable {
    fn on_demand_price(&self, shape: &str) -> Result<f64, PricingError> {
        match self.prices.get(shape) {
            Some(&price) if price.is_finite() && price >= 0.0 => Ok(price),
            Some(&price) => Err(PricingError::Unavailable(format!(
                "{shape} has unusable price {price}"
            ))),
            None => Err(PricingError::UnknownShape(shape.to_string())),
        }
    }
}
