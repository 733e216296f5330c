//! Base per-plate prices keyed by rate plan and food type

use anyhow::Context;
use shared::models::{FoodType, RatePlan};
use std::collections::BTreeMap;
use std::path::Path;

/// Built-in base prices (₹ per plate)
///
/// Diamond has no default price: it is quoted per event and must come from
/// a configured rate table.
const DEFAULT_RATES: &[(RatePlan, FoodType, f64)] = &[
    (RatePlan::Silver, FoodType::Veg, 950.0),
    (RatePlan::Silver, FoodType::NonVeg, 1100.0),
    (RatePlan::Silver, FoodType::Both, 1150.0),
    (RatePlan::Gold, FoodType::Veg, 1250.0),
    (RatePlan::Gold, FoodType::NonVeg, 1400.0),
    (RatePlan::Gold, FoodType::Both, 1500.0),
    (RatePlan::Platinum, FoodType::Veg, 1600.0),
    (RatePlan::Platinum, FoodType::NonVeg, 1800.0),
    (RatePlan::Platinum, FoodType::Both, 1900.0),
];

/// Static rate table
///
/// JSON shape: `{"Gold": {"Veg": 1250, "Non-Veg": 1400}, ...}`
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: BTreeMap<RatePlan, BTreeMap<FoodType, f64>>,
}

impl RateTable {
    pub fn empty() -> Self {
        Self {
            rates: BTreeMap::new(),
        }
    }

    /// Base price for a plan/food combination
    pub fn base_price(&self, rate_plan: RatePlan, food_type: FoodType) -> Option<f64> {
        self.rates
            .get(&rate_plan)
            .and_then(|by_food| by_food.get(&food_type))
            .copied()
    }

    /// Insert or replace a price; negative and non-finite prices are ignored
    pub fn set(&mut self, rate_plan: RatePlan, food_type: FoodType, price: f64) {
        if !price.is_finite() || price < 0.0 {
            tracing::warn!(%rate_plan, %food_type, price, "Ignoring invalid base price");
            return;
        }
        self.rates
            .entry(rate_plan)
            .or_default()
            .insert(food_type, price);
    }

    pub fn len(&self) -> usize {
        self.rates.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse a rate table from JSON, validating every price
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let parsed: RateTable = serde_json::from_str(json)?;
        let mut table = Self::empty();
        for (plan, by_food) in parsed.rates {
            for (food, price) in by_food {
                table.set(plan, food, price);
            }
        }
        Ok(table)
    }

    /// Load a rate table from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rate table {}", path.display()))?;
        let table = Self::from_json(&contents)
            .with_context(|| format!("Invalid rate table {}", path.display()))?;
        tracing::info!(path = %path.display(), entries = table.len(), "Loaded rate table");
        Ok(table)
    }
}

impl Default for RateTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for &(plan, food, price) in DEFAULT_RATES {
            table.set(plan, food, price);
        }
        table
    }
}
