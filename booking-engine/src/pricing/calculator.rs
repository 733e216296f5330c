//! Price Calculator
//!
//! Per-plate rate and booking total. Uses rust_decimal for precise
//! calculations, stores as f64.

use super::RateTable;
use crate::core::error::{BookingError, Result};
use crate::money::{to_decimal, to_f64, try_to_decimal};
use rust_decimal::prelude::*;
use shared::models::{DiscountMode, FoodType, RatePlan};

/// Inputs of the per-plate rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateRateInput {
    pub food_type: Option<FoodType>,
    pub rate_plan: Option<RatePlan>,
    pub use_custom_price: bool,
    pub custom_plate_price: f64,
    /// Already clamped to the role's cap
    pub discount: f64,
    pub discount_mode: DiscountMode,
    pub gst_percent: Option<f64>,
}

/// Resolve the undiscounted base price
///
/// - custom price wins when enabled
/// - an unfilled food type or plan prices at zero (form not complete yet)
/// - a filled combination missing from the table is an error
fn base_price(table: &RateTable, input: &PlateRateInput) -> Result<Decimal> {
    if input.use_custom_price {
        return Ok(to_decimal(input.custom_plate_price).max(Decimal::ZERO));
    }

    match (input.food_type, input.rate_plan) {
        (Some(food_type), Some(rate_plan)) => table
            .base_price(rate_plan, food_type)
            .map(to_decimal)
            .ok_or(BookingError::RateNotFound {
                food_type,
                rate_plan,
            }),
        _ => Ok(Decimal::ZERO),
    }
}

/// Calculate the rate per plate
///
/// Order: base → discount (floored at zero) → GST on the discounted base.
pub fn rate_per_plate(table: &RateTable, input: &PlateRateInput) -> Result<f64> {
    let base = base_price(table, input)?;
    // Discounts past the decimal range floor the rate at zero
    let discount = if input.discount.is_finite() {
        try_to_decimal(input.discount)
            .unwrap_or(Decimal::MAX)
            .max(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    let discounted = match input.discount_mode {
        DiscountMode::Percentage if discount >= Decimal::ONE_HUNDRED => Decimal::ZERO,
        DiscountMode::Percentage => base * (Decimal::ONE - discount / Decimal::ONE_HUNDRED),
        DiscountMode::FixedAmount => (base - discount).max(Decimal::ZERO),
    };

    let gst = input
        .gst_percent
        .map(to_decimal)
        .unwrap_or(Decimal::ZERO)
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    let with_tax = discounted
        .checked_mul(Decimal::ONE + gst / Decimal::ONE_HUNDRED)
        .ok_or(BookingError::AmountOutOfRange("ratePerPlate"))?;

    Ok(to_f64(with_tax))
}

/// Calculate the booking total
///
/// Formula: rate_per_plate * pax + decoration + music
pub fn compute_total(
    rate_per_plate: f64,
    pax: u32,
    decoration_charge: f64,
    music_charge: f64,
) -> Result<f64> {
    let plates = to_decimal(rate_per_plate)
        .max(Decimal::ZERO)
        .checked_mul(Decimal::from(pax));
    let total = plates
        .and_then(|plates| plates.checked_add(to_decimal(decoration_charge).max(Decimal::ZERO)))
        .and_then(|sum| sum.checked_add(to_decimal(music_charge).max(Decimal::ZERO)))
        .ok_or(BookingError::AmountOutOfRange("total"))?;
    Ok(to_f64(total))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gold_veg() -> PlateRateInput {
        PlateRateInput {
            food_type: Some(FoodType::Veg),
            rate_plan: Some(RatePlan::Gold),
            use_custom_price: false,
            custom_plate_price: 0.0,
            discount: 0.0,
            discount_mode: DiscountMode::Percentage,
            gst_percent: None,
        }
    }

    #[test]
    fn test_base_rate_without_adjustments() {
        let rate = rate_per_plate(&RateTable::default(), &gold_veg()).unwrap();
        assert_eq!(rate, 1250.0);
    }

    #[test]
    fn test_percentage_discount_then_gst() {
        let input = PlateRateInput {
            discount: 10.0,
            gst_percent: Some(18.0),
            ..gold_veg()
        };
        // 1250 * 0.9 * 1.18
        assert_eq!(rate_per_plate(&RateTable::default(), &input).unwrap(), 1327.5);
    }

    #[test]
    fn test_fixed_discount_floors_at_zero() {
        let input = PlateRateInput {
            discount: 5000.0,
            discount_mode: DiscountMode::FixedAmount,
            gst_percent: Some(18.0),
            ..gold_veg()
        };
        assert_eq!(rate_per_plate(&RateTable::default(), &input).unwrap(), 0.0);

        let input = PlateRateInput {
            discount: 250.0,
            discount_mode: DiscountMode::FixedAmount,
            gst_percent: Some(5.0),
            ..gold_veg()
        };
        // (1250 - 250) * 1.05
        assert_eq!(rate_per_plate(&RateTable::default(), &input).unwrap(), 1050.0);
    }

    #[test]
    fn test_percentage_over_hundred_never_negative() {
        let input = PlateRateInput {
            discount: 150.0,
            ..gold_veg()
        };
        assert_eq!(rate_per_plate(&RateTable::default(), &input).unwrap(), 0.0);
    }

    #[test]
    fn test_custom_price_overrides_table() {
        let input = PlateRateInput {
            use_custom_price: true,
            custom_plate_price: 2000.0,
            rate_plan: Some(RatePlan::Diamond),
            ..gold_veg()
        };
        assert_eq!(rate_per_plate(&RateTable::default(), &input).unwrap(), 2000.0);
    }

    #[test]
    fn test_unknown_combination_is_an_error() {
        let input = PlateRateInput {
            rate_plan: Some(RatePlan::Diamond),
            ..gold_veg()
        };
        assert_eq!(
            rate_per_plate(&RateTable::default(), &input),
            Err(BookingError::RateNotFound {
                food_type: FoodType::Veg,
                rate_plan: RatePlan::Diamond,
            })
        );
    }

    #[test]
    fn test_incomplete_selection_prices_at_zero() {
        let input = PlateRateInput {
            food_type: None,
            ..gold_veg()
        };
        assert_eq!(rate_per_plate(&RateTable::default(), &input).unwrap(), 0.0);

        let input = PlateRateInput {
            rate_plan: None,
            ..gold_veg()
        };
        assert_eq!(rate_per_plate(&RateTable::empty(), &input).unwrap(), 0.0);
    }

    #[test]
    fn test_gst_clamped_to_hundred() {
        let input = PlateRateInput {
            gst_percent: Some(250.0),
            ..gold_veg()
        };
        assert_eq!(rate_per_plate(&RateTable::default(), &input).unwrap(), 2500.0);
    }

    #[test]
    fn test_compute_total() {
        assert_eq!(compute_total(1327.5, 50, 0.0, 0.0), Ok(66375.0));
        assert_eq!(compute_total(2000.0, 10, 0.0, 0.0), Ok(20000.0));
        assert_eq!(compute_total(1000.0, 0, 5000.0, 2500.0), Ok(7500.0));
        assert_eq!(compute_total(99.99, 3, 0.01, 0.0), Ok(299.98));
    }

    #[test]
    fn test_compute_total_ignores_negative_charges() {
        assert_eq!(compute_total(100.0, 2, -50.0, -1.0), Ok(200.0));
    }

    #[test]
    fn test_oversized_amounts_are_errors() {
        let input = PlateRateInput {
            use_custom_price: true,
            custom_plate_price: 6e28,
            gst_percent: Some(100.0),
            ..gold_veg()
        };
        assert_eq!(
            rate_per_plate(&RateTable::default(), &input),
            Err(BookingError::AmountOutOfRange("ratePerPlate"))
        );
        assert_eq!(
            compute_total(1e20, u32::MAX, 0.0, 0.0),
            Err(BookingError::AmountOutOfRange("total"))
        );
        assert_eq!(
            compute_total(0.0, 0, 5e28, 5e28),
            Err(BookingError::AmountOutOfRange("total"))
        );
    }

    #[test]
    fn test_huge_discount_floors_at_zero() {
        let input = PlateRateInput {
            discount: 1e300,
            ..gold_veg()
        };
        assert_eq!(rate_per_plate(&RateTable::default(), &input).unwrap(), 0.0);

        let input = PlateRateInput {
            discount: 1e300,
            discount_mode: DiscountMode::FixedAmount,
            ..gold_veg()
        };
        assert_eq!(rate_per_plate(&RateTable::default(), &input).unwrap(), 0.0);
    }
}
