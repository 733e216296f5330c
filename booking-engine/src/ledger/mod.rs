//! Advance payment ledger
//!
//! Rows are addressed by position, as in the booking form table. Edits to a
//! row that does not exist are logged and ignored.

use crate::core::error::{BookingError, Result};
use crate::money::{sum_advances, to_decimal, to_f64};
use shared::booking::{AdvanceField, AdvancePayment};

/// Coerce an entered amount: negative or non-finite becomes zero
pub fn coerce_amount(amount: f64) -> f64 {
    if amount.is_finite() && amount > 0.0 {
        to_f64(to_decimal(amount))
    } else {
        0.0
    }
}

/// Append a payment row
pub fn add_advance_payment(advances: &mut Vec<AdvancePayment>, mut payment: AdvancePayment) {
    payment.amount = coerce_amount(payment.amount);
    tracing::debug!(
        amount = payment.amount,
        method = payment.method.as_str(),
        rows = advances.len() + 1,
        "Advance payment added"
    );
    advances.push(payment);
}

/// Edit one field of a payment row
///
/// Returns `false` when `index` is out of range.
pub fn update_advance_payment(
    advances: &mut [AdvancePayment],
    index: usize,
    field: AdvanceField,
) -> bool {
    let rows = advances.len();
    let Some(payment) = advances.get_mut(index) else {
        tracing::warn!(index, rows, "Ignoring edit of unknown advance row");
        return false;
    };

    match field {
        AdvanceField::Amount(amount) => payment.amount = coerce_amount(amount),
        AdvanceField::Date(date) => payment.date = date,
        AdvanceField::Method(method) => payment.method = method,
        AdvanceField::Remarks(remarks) => payment.remarks = remarks,
    }
    true
}

/// Remove a payment row, returning it
pub fn remove_advance_payment(
    advances: &mut Vec<AdvancePayment>,
    index: usize,
) -> Option<AdvancePayment> {
    if index >= advances.len() {
        tracing::warn!(index, rows = advances.len(), "Ignoring removal of unknown advance row");
        return None;
    }
    Some(advances.remove(index))
}

/// Balance = total - Σ advances
///
/// Negative when the guest has overpaid.
pub fn compute_balance(total: f64, advances: &[AdvancePayment]) -> Result<f64> {
    let paid = sum_advances(advances).ok_or(BookingError::AmountOutOfRange("advance"))?;
    to_decimal(total)
        .checked_sub(paid)
        .map(to_f64)
        .ok_or(BookingError::AmountOutOfRange("balance"))
}
