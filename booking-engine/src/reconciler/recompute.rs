//! The single recompute pass over a draft

use super::ReconcileContext;
use crate::core::error::Result;
use crate::ledger::{coerce_amount, compute_balance};
use crate::pricing::{PlateRateInput, compute_total, rate_per_plate};
use crate::status::{append_status_history, derive_status};
use shared::booking::BookingDraft;

/// Recompute every derived field of `draft`
///
/// Pure: returns a new draft and leaves the input untouched, so a failed
/// recompute (`RateNotFound`, `AmountOutOfRange`) never half-applies.
/// Running it twice with the same `now` yields the same draft.
pub fn recompute(draft: &BookingDraft, ctx: &ReconcileContext, now: i64) -> Result<BookingDraft> {
    let mut next = draft.clone();

    // Normalize inputs
    if !next.has_decoration {
        next.decoration_charge = 0.0;
    }
    if !next.has_music {
        next.music_charge = 0.0;
    }
    next.decoration_charge = coerce_amount(next.decoration_charge);
    next.music_charge = coerce_amount(next.music_charge);
    next.custom_plate_price = coerce_amount(next.custom_plate_price);
    next.discount = if next.discount.is_finite() {
        next.discount.max(0.0)
    } else {
        0.0
    };
    next.gst_percent = next
        .gst_percent
        .filter(|gst| gst.is_finite())
        .map(|gst| gst.clamp(0.0, 100.0));
    for payment in &mut next.advance_payments {
        payment.amount = coerce_amount(payment.amount);
    }

    // Pricing
    next.rate_per_plate = rate_per_plate(
        &ctx.rates,
        &PlateRateInput {
            food_type: next.food_type,
            rate_plan: next.rate_plan,
            use_custom_price: next.use_custom_price,
            custom_plate_price: next.custom_plate_price,
            discount: next.discount,
            discount_mode: ctx.discount.mode,
            gst_percent: next.gst_percent,
        },
    )?;
    next.total = compute_total(
        next.rate_per_plate,
        next.pax,
        next.decoration_charge,
        next.music_charge,
    )?;
    next.balance = compute_balance(next.total, &next.advance_payments)?;

    // Status
    let status = derive_status(
        &next.advance_payments,
        next.booking_status,
        next.manual_status,
        ctx.fallback_status,
    );
    if status != next.booking_status {
        tracing::info!(
            id = next.id.as_deref().unwrap_or("new"),
            from = %next.booking_status,
            to = %status,
            "Booking status changed"
        );
    }
    next.booking_status = status;
    append_status_history(&mut next.status_history, status, now);

    tracing::debug!(
        rate_per_plate = next.rate_per_plate,
        total = next.total,
        balance = next.balance,
        status = %next.booking_status,
        "Booking recomputed"
    );
    Ok(next)
}
