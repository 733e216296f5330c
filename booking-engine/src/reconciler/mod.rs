//! Booking reconciler
//!
//! Owns one [`BookingDraft`] and keeps its derived fields consistent: every
//! handler applies its edit to a copy, runs [`recompute`], and commits only
//! on success.
//!
//! ```text
//! edit ──► candidate = draft.clone() + edit ──► recompute ──► Ok  ──► draft = candidate
//!                                                        └──► Err ──► draft unchanged
//! ```

mod context;
mod field;
mod recompute;


pub use context::ReconcileContext;
pub use field::FieldChange;
pub use recompute::recompute;

use crate::core::error::Result;
use crate::ledger;
use crate::money::has_advance;
use crate::status::{append_status_history, check_manual_transition, derive_status};
use shared::booking::{
    AdvanceField, AdvancePayment, BookingDraft, BookingRecord, BookingStatus, SubmitRequest,
};
use shared::models::{FoodType, RatePlan};
use shared::util::now_millis;

pub struct BookingReconciler {
    draft: BookingDraft,
    ctx: ReconcileContext,
    clock: fn() -> i64,
}

impl BookingReconciler {
    /// Start a new booking
    pub fn new(ctx: ReconcileContext) -> Self {
        Self::with_clock(ctx, now_millis)
    }

    /// Start a new booking with a custom time source (history timestamps)
    pub fn with_clock(ctx: ReconcileContext, clock: fn() -> i64) -> Self {
        Self {
            draft: BookingDraft::new(clock()),
            ctx,
            clock,
        }
    }

    /// Load a booking returned by the server
    ///
    /// Persisted `total`/`balance` are kept until the first edit or
    /// [`refresh`](Self::refresh). A persisted status the ledger would not
    /// produce on its own is treated as a manual choice.
    pub fn hydrate(record: BookingRecord, ctx: ReconcileContext) -> Self {
        let mut draft = BookingDraft::from(record);
        let automatic = derive_status(
            &draft.advance_payments,
            draft.booking_status,
            None,
            ctx.fallback_status,
        );
        if !draft.booking_status.is_cancelled() && draft.booking_status != automatic {
            draft.manual_status = Some(draft.booking_status);
        }
        tracing::debug!(
            id = draft.id.as_deref().unwrap_or("new"),
            status = %draft.booking_status,
            manual = ?draft.manual_status,
            "Booking hydrated"
        );

        Self {
            draft,
            ctx,
            clock: now_millis,
        }
    }

    pub fn with_time_source(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn context(&self) -> &ReconcileContext {
        &self.ctx
    }

    /// Recompute without an edit
    pub fn refresh(&mut self) -> Result<()> {
        self.update(|_, _| {})
    }

    /// Apply `edit` to a copy of the draft and commit it if recompute succeeds
    fn update(&mut self, edit: impl FnOnce(&mut BookingDraft, &ReconcileContext)) -> Result<()> {
        let mut candidate = self.draft.clone();
        edit(&mut candidate, &self.ctx);
        self.draft = recompute(&candidate, &self.ctx, (self.clock)())?;
        Ok(())
    }

    // ========================================================================
    // Pricing inputs
    // ========================================================================

    /// Apply a typed field edit
    pub fn apply(&mut self, change: FieldChange) -> Result<()> {
        self.update(|draft, ctx| match change {
            FieldChange::Pax(pax) => draft.pax = pax,
            FieldChange::RatePlan(plan) => draft.rate_plan = plan,
            FieldChange::FoodType(food) => draft.food_type = food,
            FieldChange::UseCustomPrice(enabled) => draft.use_custom_price = enabled,
            FieldChange::CustomPlatePrice(price) => draft.custom_plate_price = price,
            FieldChange::Discount(discount) => {
                draft.discount = ctx.discount.clamp(discount, ctx.role, draft.rate_plan)
            }
            FieldChange::Gst(gst) => draft.gst_percent = gst,
            FieldChange::Decoration(enabled) => draft.has_decoration = enabled,
            FieldChange::DecorationCharge(charge) => draft.decoration_charge = charge,
            FieldChange::Music(enabled) => draft.has_music = enabled,
            FieldChange::MusicCharge(charge) => draft.music_charge = charge,
        })
    }

    /// Apply a raw `(field, text)` edit from the form
    ///
    /// Fields that do not affect pricing are ignored.
    pub fn apply_raw(&mut self, field: &str, raw: &str) -> Result<()> {
        match FieldChange::from_raw(field, raw) {
            Some(change) => self.apply(change),
            None => {
                tracing::debug!(field, "Field does not affect pricing");
                Ok(())
            }
        }
    }

    pub fn set_pax(&mut self, pax: u32) -> Result<()> {
        self.apply(FieldChange::Pax(pax))
    }

    pub fn set_rate_plan(&mut self, rate_plan: Option<RatePlan>) -> Result<()> {
        self.apply(FieldChange::RatePlan(rate_plan))
    }

    pub fn set_food_type(&mut self, food_type: Option<FoodType>) -> Result<()> {
        self.apply(FieldChange::FoodType(food_type))
    }

    /// Toggle the custom plate price and set its value in one edit
    pub fn set_custom_price(&mut self, enabled: bool, price: f64) -> Result<()> {
        self.update(|draft, _| {
            draft.use_custom_price = enabled;
            draft.custom_plate_price = price;
        })
    }

    /// Set the discount, clamped to the operator's cap
    pub fn set_discount(&mut self, discount: f64) -> Result<()> {
        self.apply(FieldChange::Discount(discount))
    }

    pub fn set_gst(&mut self, gst_percent: Option<f64>) -> Result<()> {
        self.apply(FieldChange::Gst(gst_percent))
    }

    /// Toggle decoration; turning it off zeroes the charge
    pub fn set_decoration(&mut self, enabled: bool, charge: f64) -> Result<()> {
        self.update(|draft, _| {
            draft.has_decoration = enabled;
            draft.decoration_charge = charge;
        })
    }

    /// Toggle music; turning it off zeroes the charge
    pub fn set_music(&mut self, enabled: bool, charge: f64) -> Result<()> {
        self.update(|draft, _| {
            draft.has_music = enabled;
            draft.music_charge = charge;
        })
    }

    // ========================================================================
    // Ledger
    // ========================================================================

    pub fn add_advance(&mut self, payment: AdvancePayment) -> Result<()> {
        self.update(|draft, _| ledger::add_advance_payment(&mut draft.advance_payments, payment))
    }

    /// Edit one field of an advance row; unknown rows are ignored
    pub fn update_advance(&mut self, index: usize, field: AdvanceField) -> Result<()> {
        self.update(|draft, _| {
            ledger::update_advance_payment(&mut draft.advance_payments, index, field);
        })
    }

    /// Remove an advance row; unknown rows are ignored
    pub fn remove_advance(&mut self, index: usize) -> Result<()> {
        self.update(|draft, _| {
            ledger::remove_advance_payment(&mut draft.advance_payments, index);
        })
    }

    // ========================================================================
    // Status
    // ========================================================================

    /// Pick a status from the dropdown
    ///
    /// Re-selecting the current status does nothing. Cancelling commits even
    /// when the draft cannot be repriced; the previous totals are kept.
    pub fn set_status(&mut self, status: BookingStatus) -> Result<()> {
        let from = self.draft.booking_status;
        check_manual_transition(
            self.ctx.role,
            from,
            status,
            has_advance(&self.draft.advance_payments),
            self.ctx.manual_status_requires_admin,
        )?;
        if from == status {
            return Ok(());
        }

        let result = self.update(|draft, _| {
            draft.manual_status = Some(status);
            draft.booking_status = status;
        });
        match result {
            Ok(()) => {}
            Err(e) if status.is_cancelled() => {
                tracing::warn!(error = %e, "Cancelling without repricing");
                self.draft.manual_status = Some(status);
                self.draft.booking_status = status;
                append_status_history(&mut self.draft.status_history, status, (self.clock)());
            }
            Err(e) => return Err(e),
        }

        crate::audit_log!(
            self.draft.id.as_deref().unwrap_or("new"),
            from.as_str(),
            status.as_str(),
            self.ctx.role.as_str()
        );
        Ok(())
    }

    // ========================================================================
    // Submit
    // ========================================================================

    /// Recompute and build the request that persists the draft
    pub fn submit_request(&mut self) -> Result<SubmitRequest> {
        self.refresh()?;
        Ok(SubmitRequest::for_draft(&self.draft))
    }
}
