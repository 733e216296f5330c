//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to `f64`
//! for storage/serialization.

use rust_decimal::prelude::*;
use shared::booking::AdvancePayment;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert f64 to Decimal for calculation
///
/// Non-finite values and magnitudes beyond `Decimal`'s range become zero.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    match Decimal::from_f64(value) {
        Some(decimal) => decimal,
        None => {
            if value.is_finite() {
                tracing::warn!(value, "Amount exceeds decimal range, using 0");
            }
            Decimal::ZERO
        }
    }
}

/// Convert f64 to Decimal, `None` when it has no decimal representation
#[inline]
pub fn try_to_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value)
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Sum advance amounts with precise arithmetic
///
/// `None` when the sum overflows.
pub fn sum_advances(advances: &[AdvancePayment]) -> Option<Decimal> {
    advances
        .iter()
        .try_fold(Decimal::ZERO, |sum, a| sum.checked_add(to_decimal(a.amount)))
}

/// Whether any money has been received
pub fn has_advance(advances: &[AdvancePayment]) -> bool {
    advances.iter().any(|a| to_decimal(a.amount) > Decimal::ZERO)
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}
