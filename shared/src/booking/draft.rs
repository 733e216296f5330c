//! Booking draft - the in-memory form state of one booking
//!
//! Input fields are written by the booking form; `rate_per_plate`, `total`,
//! `balance` and `booking_status` are derived and only trusted after a
//! recompute pass.

use super::types::{AdvancePayment, BookingStatus, StatusChange};
use crate::models::rate::{FoodType, RatePlan};
use chrono::NaiveDate;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookingDraft {
    // === Identity (opaque to pricing) ===
    /// Server-side id, `None` for a new booking
    pub id: Option<String>,
    /// Guest registration card number
    pub grc_no: Option<String>,
    pub customer_name: Option<String>,
    pub event_date: Option<NaiveDate>,

    // === Pricing inputs ===
    pub pax: u32,
    pub rate_plan: Option<RatePlan>,
    pub food_type: Option<FoodType>,
    pub use_custom_price: bool,
    pub custom_plate_price: f64,
    /// Percentage or fixed amount, depending on the configured discount mode
    pub discount: f64,
    pub gst_percent: Option<f64>,
    pub has_decoration: bool,
    pub decoration_charge: f64,
    pub has_music: bool,
    pub music_charge: f64,

    // === Ledger ===
    pub advance_payments: Vec<AdvancePayment>,

    // === Derived ===
    pub rate_per_plate: f64,
    pub total: f64,
    pub balance: f64,
    pub booking_status: BookingStatus,

    // === Status control ===
    /// Status picked from the dropdown; wins over the fallback while no advance is paid
    pub manual_status: Option<BookingStatus>,
    /// Append-only audit log; last entry always matches `booking_status` after recompute
    pub status_history: Vec<StatusChange>,

    /// Server fields this crate does not interpret, kept for the round trip
    pub extra: Map<String, Value>,
}

impl BookingDraft {
    /// Create an empty draft for a new booking
    ///
    /// Starts in `Enquiry` with a single history entry.
    pub fn new(created_at: i64) -> Self {
        Self {
            booking_status: BookingStatus::Enquiry,
            status_history: vec![StatusChange {
                status: BookingStatus::Enquiry,
                changed_at: created_at,
            }],
            ..Default::default()
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}
