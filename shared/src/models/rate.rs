//! Rate Plan Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named pricing tier (套餐等级)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RatePlan {
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl RatePlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Platinum => "Platinum",
            Self::Diamond => "Diamond",
        }
    }
}

/// Food type served at the function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FoodType {
    Veg,
    NonVeg,
    Both,
}

impl FoodType {
    pub const ALL: [FoodType; 3] = [Self::Veg, Self::NonVeg, Self::Both];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Veg => "Veg",
            Self::NonVeg => "Non-Veg",
            Self::Both => "Both",
        }
    }
}

/// How a discount value is applied to the base plate price
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountMode {
    /// `discount` is a percentage of the base price (10 = 10%)
    #[default]
    Percentage,
    /// `discount` is subtracted from the base price (100 = ₹100 per plate)
    FixedAmount,
}

/// Error returned when a label does not name a known variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Normalize a UI label: lowercase, drop spaces, dashes and underscores
pub(crate) fn normalize_label(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for RatePlan {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "silver" => Ok(Self::Silver),
            "gold" => Ok(Self::Gold),
            "platinum" => Ok(Self::Platinum),
            "diamond" => Ok(Self::Diamond),
            _ => Err(UnknownVariant {
                kind: "rate plan",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for FoodType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "veg" | "vegetarian" => Ok(Self::Veg),
            "nonveg" | "nonvegetarian" => Ok(Self::NonVeg),
            "both" | "mixed" => Ok(Self::Both),
            _ => Err(UnknownVariant {
                kind: "food type",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for RatePlan {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RatePlan> for String {
    fn from(plan: RatePlan) -> Self {
        plan.as_str().to_string()
    }
}

impl TryFrom<String> for FoodType {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FoodType> for String {
    fn from(food: FoodType) -> Self {
        food.as_str().to_string()
    }
}

impl fmt::Display for RatePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ui_labels() {
        assert_eq!("Gold".parse::<RatePlan>(), Ok(RatePlan::Gold));
        assert_eq!(" platinum ".parse::<RatePlan>(), Ok(RatePlan::Platinum));
        assert_eq!("Non-Veg".parse::<FoodType>(), Ok(FoodType::NonVeg));
        assert_eq!("non_veg".parse::<FoodType>(), Ok(FoodType::NonVeg));
        assert_eq!("VEG".parse::<FoodType>(), Ok(FoodType::Veg));
        assert!("Bronze".parse::<RatePlan>().is_err());
    }

    #[test]
    fn test_serde_uses_ui_labels() {
        assert_eq!(serde_json::to_string(&FoodType::NonVeg).unwrap(), "\"Non-Veg\"");
        assert_eq!(serde_json::to_string(&RatePlan::Silver).unwrap(), "\"Silver\"");

        let plan: RatePlan = serde_json::from_str("\"diamond\"").unwrap();
        assert_eq!(plan, RatePlan::Diamond);
        assert!(serde_json::from_str::<FoodType>("\"Vegan\"").is_err());
    }

    #[test]
    fn test_discount_mode_serde() {
        let json = serde_json::to_string(&DiscountMode::FixedAmount).unwrap();
        assert_eq!(json, "\"FIXED_AMOUNT\"");
        assert_eq!(DiscountMode::default(), DiscountMode::Percentage);
    }
}
