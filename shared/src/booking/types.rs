//! Shared types for booking drafts

use crate::models::rate::{UnknownVariant, normalize_label};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Booking Status
// ============================================================================

/// Booking status (预订状态)
///
/// `Cancelled` is only reachable through an explicit admin action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "String", into = "String")]
pub enum BookingStatus {
    /// New booking, nothing agreed yet
    #[default]
    Enquiry,
    /// Dates held without advance
    Tentative,
    /// Advance received (or confirmed manually by an admin)
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enquiry => "Enquiry",
            Self::Tentative => "Tentative",
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "enquiry" | "inquiry" => Ok(Self::Enquiry),
            "tentative" => Ok(Self::Tentative),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(UnknownVariant {
                kind: "booking status",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for BookingStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the append-only status audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub status: BookingStatus,
    /// Unix millis
    pub changed_at: i64,
}

// ============================================================================
// Advance Payments
// ============================================================================

/// Payment method of an advance
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "String", into = "String")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Upi,
    BankTransfer,
    Cheque,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Card => "Card",
            Self::Upi => "UPI",
            Self::BankTransfer => "Bank Transfer",
            Self::Cheque => "Cheque",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "cash" => Ok(Self::Cash),
            "card" | "creditcard" | "debitcard" => Ok(Self::Card),
            "upi" | "gpay" | "phonepe" => Ok(Self::Upi),
            "banktransfer" | "neft" | "rtgs" | "imps" | "bank" => Ok(Self::BankTransfer),
            "cheque" | "check" => Ok(Self::Cheque),
            _ => Err(UnknownVariant {
                kind: "payment method",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for PaymentMethod {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> Self {
        method.as_str().to_string()
    }
}

/// Advance payment recorded against a booking
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdvancePayment {
    pub amount: f64,
    pub date: Option<NaiveDate>,
    pub method: PaymentMethod,
    pub remarks: String,
}

/// Single-field edit of an advance payment row
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceField {
    Amount(f64),
    Date(Option<NaiveDate>),
    Method(PaymentMethod),
    Remarks(String),
}
