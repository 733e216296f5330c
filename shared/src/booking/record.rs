//! Wire format of a booking as exchanged with the booking REST API
//!
//! `BookingRecord` is the camelCase JSON shape. Reading one is lenient
//! (see [`super::serde_helpers`]); writing one always emits clean numbers.

use super::draft::BookingDraft;
use super::serde_helpers::*;
use super::types::{AdvancePayment, BookingStatus, PaymentMethod, StatusChange};
use crate::models::rate::{FoodType, RatePlan};
use chrono::NaiveDate;
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Collection path of the booking API
pub const BOOKINGS_PATH: &str = "/bookings";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        default,
        alias = "grc",
        alias = "grc_no",
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub grc_no: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub customer_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub event_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "lenient_u32")]
    pub pax: u32,
    #[serde(default, deserialize_with = "lenient_opt_enum")]
    pub rate_plan: Option<RatePlan>,
    #[serde(default, deserialize_with = "lenient_opt_enum")]
    pub food_type: Option<FoodType>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub use_custom_price: bool,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub custom_plate_price: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub discount: f64,
    #[serde(default, alias = "gstPercent", deserialize_with = "lenient_opt_f64")]
    pub gst: Option<f64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub decoration: bool,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub decoration_charge: f64,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub music: bool,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub music_charge: f64,

    #[serde(default, alias = "advancePayments", deserialize_with = "lenient_vec")]
    pub advance: Vec<AdvanceRecord>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub rate_per_plate: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub balance: f64,
    #[serde(default, alias = "status", deserialize_with = "lenient_opt_enum")]
    pub booking_status: Option<BookingStatus>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub status_history: Vec<StatusChangeRecord>,

    /// Fields owned by other screens (hall, menu, contact...), passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceRecord {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: f64,
    #[serde(
        default,
        deserialize_with = "lenient_opt_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_opt_enum")]
    pub method: Option<PaymentMethod>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeRecord {
    #[serde(default, deserialize_with = "lenient_opt_enum")]
    pub status: Option<BookingStatus>,
    #[serde(default, alias = "date", deserialize_with = "lenient_millis")]
    pub changed_at: i64,
}

impl From<AdvanceRecord> for AdvancePayment {
    fn from(record: AdvanceRecord) -> Self {
        Self {
            amount: record.amount.max(0.0),
            date: record.date,
            method: record.method.unwrap_or_default(),
            remarks: record.remarks.unwrap_or_default(),
        }
    }
}

impl From<&AdvancePayment> for AdvanceRecord {
    fn from(payment: &AdvancePayment) -> Self {
        Self {
            amount: payment.amount,
            date: payment.date,
            method: Some(payment.method),
            remarks: (!payment.remarks.is_empty()).then(|| payment.remarks.clone()),
        }
    }
}

impl StatusChangeRecord {
    /// Entries whose status label is unrecognized are dropped on hydration
    pub fn into_change(self) -> Option<StatusChange> {
        self.status.map(|status| StatusChange {
            status,
            changed_at: self.changed_at,
        })
    }
}

impl From<&StatusChange> for StatusChangeRecord {
    fn from(change: &StatusChange) -> Self {
        Self {
            status: Some(change.status),
            changed_at: change.changed_at,
        }
    }
}

impl From<BookingRecord> for BookingDraft {
    /// Hydrate a draft from a server record
    ///
    /// `total`/`balance` are carried as persisted until the first recompute.
    /// A missing status falls back to the last history entry, then `Enquiry`.
    fn from(record: BookingRecord) -> Self {
        let status_history: Vec<StatusChange> = record
            .status_history
            .into_iter()
            .filter_map(StatusChangeRecord::into_change)
            .collect();
        let booking_status = record
            .booking_status
            .or_else(|| status_history.last().map(|entry| entry.status))
            .unwrap_or_default();

        Self {
            id: record.id,
            grc_no: record.grc_no,
            customer_name: record.customer_name,
            event_date: record.event_date,
            pax: record.pax,
            rate_plan: record.rate_plan,
            food_type: record.food_type,
            use_custom_price: record.use_custom_price,
            custom_plate_price: record.custom_plate_price.max(0.0),
            discount: record.discount.max(0.0),
            gst_percent: record.gst.map(|g| g.clamp(0.0, 100.0)),
            has_decoration: record.decoration,
            decoration_charge: record.decoration_charge.max(0.0),
            has_music: record.music,
            music_charge: record.music_charge.max(0.0),
            advance_payments: record.advance.into_iter().map(Into::into).collect(),
            rate_per_plate: record.rate_per_plate,
            total: record.total,
            balance: record.balance,
            booking_status,
            manual_status: None,
            status_history,
            extra: record.extra,
        }
    }
}

impl From<&BookingDraft> for BookingRecord {
    fn from(draft: &BookingDraft) -> Self {
        Self {
            id: draft.id.clone(),
            grc_no: draft.grc_no.clone(),
            customer_name: draft.customer_name.clone(),
            event_date: draft.event_date,
            pax: draft.pax,
            rate_plan: draft.rate_plan,
            food_type: draft.food_type,
            use_custom_price: draft.use_custom_price,
            custom_plate_price: draft.custom_plate_price,
            discount: draft.discount,
            gst: draft.gst_percent,
            decoration: draft.has_decoration,
            decoration_charge: draft.decoration_charge,
            music: draft.has_music,
            music_charge: draft.music_charge,
            advance: draft.advance_payments.iter().map(Into::into).collect(),
            rate_per_plate: draft.rate_per_plate,
            total: draft.total,
            balance: draft.balance,
            booking_status: Some(draft.booking_status),
            status_history: draft.status_history.iter().map(Into::into).collect(),
            extra: draft.extra.clone(),
        }
    }
}

/// Request the persistence layer sends on submit
#[derive(Debug, Clone, Serialize)]
pub struct SubmitRequest {
    #[serde(with = "method_str")]
    pub method: Method,
    pub path: String,
    pub body: BookingRecord,
}

impl SubmitRequest {
    /// `POST /bookings` for a new draft, `PUT /bookings/{id}` for an edit
    pub fn for_draft(draft: &BookingDraft) -> Self {
        let (method, path) = match &draft.id {
            Some(id) => (Method::PUT, format!("{}/{}", BOOKINGS_PATH, id)),
            None => (Method::POST, BOOKINGS_PATH.to_string()),
        };
        Self {
            method,
            path,
            body: draft.into(),
        }
    }
}

mod method_str {
    use http::Method;
    use serde::Serializer;

    pub fn serialize<S>(method: &Method, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(method.as_str())
    }
}
