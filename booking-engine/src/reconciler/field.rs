//! Raw form edits
//!
//! The form reports edits as `(field, text)` pairs; [`FieldChange::from_raw`]
//! turns them into typed changes using the same lenient parsing as hydration.

use shared::booking::serde_helpers::{parse_amount, parse_count, parse_flag};
use shared::models::{FoodType, RatePlan};
use std::str::FromStr;

/// A single edit of a pricing input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldChange {
    Pax(u32),
    RatePlan(Option<RatePlan>),
    FoodType(Option<FoodType>),
    UseCustomPrice(bool),
    CustomPlatePrice(f64),
    /// Clamped to the role's cap when applied
    Discount(f64),
    Gst(Option<f64>),
    Decoration(bool),
    DecorationCharge(f64),
    Music(bool),
    MusicCharge(f64),
}

impl FieldChange {
    /// Parse a raw edit keyed by its wire field name
    ///
    /// Returns `None` for fields that do not affect pricing.
    pub fn from_raw(field: &str, raw: &str) -> Option<Self> {
        let change = match field {
            "pax" => Self::Pax(parse_count(raw)),
            "ratePlan" => Self::RatePlan(parse_choice(field, raw)),
            "foodType" => Self::FoodType(parse_choice(field, raw)),
            "useCustomPrice" => Self::UseCustomPrice(parse_flag(raw)),
            "customPlatePrice" => Self::CustomPlatePrice(parse_amount(raw)),
            "discount" => Self::Discount(parse_amount(raw)),
            "gst" | "gstPercent" => {
                Self::Gst((!raw.trim().is_empty()).then(|| parse_amount(raw)))
            }
            "decoration" => Self::Decoration(parse_flag(raw)),
            "decorationCharge" => Self::DecorationCharge(parse_amount(raw)),
            "music" => Self::Music(parse_flag(raw)),
            "musicCharge" => Self::MusicCharge(parse_amount(raw)),
            _ => return None,
        };
        Some(change)
    }
}

/// Empty selection clears the field; an unknown label clears it too
fn parse_choice<T: FromStr>(field: &str, raw: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    if raw.trim().is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(field, error = %e, "Unrecognized selection, clearing field");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_fields() {
        assert_eq!(FieldChange::from_raw("pax", "50"), Some(FieldChange::Pax(50)));
        assert_eq!(FieldChange::from_raw("pax", "-3"), Some(FieldChange::Pax(0)));
        assert_eq!(FieldChange::from_raw("pax", "abc"), Some(FieldChange::Pax(0)));
        assert_eq!(
            FieldChange::from_raw("decorationCharge", "₹ 5,000"),
            Some(FieldChange::DecorationCharge(5000.0))
        );
        assert_eq!(
            FieldChange::from_raw("discount", ""),
            Some(FieldChange::Discount(0.0))
        );
    }

    #[test]
    fn test_gst_empty_is_none() {
        assert_eq!(FieldChange::from_raw("gst", " "), Some(FieldChange::Gst(None)));
        assert_eq!(
            FieldChange::from_raw("gst", "18"),
            Some(FieldChange::Gst(Some(18.0)))
        );
    }

    #[test]
    fn test_choices_and_flags() {
        assert_eq!(
            FieldChange::from_raw("foodType", "Non-Veg"),
            Some(FieldChange::FoodType(Some(FoodType::NonVeg)))
        );
        assert_eq!(
            FieldChange::from_raw("ratePlan", "Bronze"),
            Some(FieldChange::RatePlan(None))
        );
        assert_eq!(
            FieldChange::from_raw("music", "on"),
            Some(FieldChange::Music(true))
        );
        assert_eq!(
            FieldChange::from_raw("useCustomPrice", "false"),
            Some(FieldChange::UseCustomPrice(false))
        );
    }

    #[test]
    fn test_unrelated_field() {
        assert_eq!(FieldChange::from_raw("customerName", "Mehta"), None);
    }
}
