//! Booking status derivation and audit history
//!
//! # 状态规则
//!
//! ```text
//! Cancelled ──────────────────────────────► Cancelled   (only an admin leaves it)
//! Σ advances > 0 ─────────────────────────► Confirmed
//! no advance, manual choice ──────────────► manual choice
//! no advance, no manual choice ───────────► fallback (Enquiry | Tentative)
//! ```

use crate::core::error::{BookingError, Result};
use crate::money::has_advance;
use shared::booking::{AdvancePayment, BookingStatus, StatusChange};
use shared::models::Role;

/// Derive the status from the ledger
pub fn derive_status(
    advances: &[AdvancePayment],
    current: BookingStatus,
    manual: Option<BookingStatus>,
    fallback: BookingStatus,
) -> BookingStatus {
    if current.is_cancelled() {
        return BookingStatus::Cancelled;
    }
    if has_advance(advances) {
        return BookingStatus::Confirmed;
    }
    match manual {
        // Cancelled only sticks through `current`
        Some(status) if !status.is_cancelled() => status,
        _ => fallback,
    }
}

/// Append `status` unless it is already the latest entry
///
/// Returns whether an entry was appended.
pub fn append_status_history(
    history: &mut Vec<StatusChange>,
    status: BookingStatus,
    changed_at: i64,
) -> bool {
    if history.last().is_some_and(|last| last.status == status) {
        return false;
    }
    history.push(StatusChange { status, changed_at });
    true
}

/// Validate a status picked manually from the dropdown
///
/// Picking the current status is always allowed (and is a no-op for the caller).
pub fn check_manual_transition(
    role: Role,
    from: BookingStatus,
    to: BookingStatus,
    has_advance: bool,
    requires_admin: bool,
) -> Result<()> {
    if from == to {
        return Ok(());
    }

    if to.is_cancelled() && !role.is_admin() {
        return Err(BookingError::PermissionDenied("cancel booking".into()));
    }
    if from.is_cancelled() && !role.is_admin() {
        return Err(BookingError::PermissionDenied("reopen cancelled booking".into()));
    }

    // Ledger wins over the dropdown once money is in
    if has_advance && !matches!(to, BookingStatus::Confirmed | BookingStatus::Cancelled) {
        return Err(BookingError::InvalidStatusTransition { from, to });
    }

    if requires_admin && !role.is_admin() {
        return Err(BookingError::PermissionDenied("change booking status".into()));
    }
    Ok(())
}
