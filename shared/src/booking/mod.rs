//! Booking form state
//!
//! - Draft: the in-memory booking being edited
//! - Types: status, advance payments, history entries
//! - Record: the JSON shape exchanged with the booking API

pub mod draft;
pub mod record;
pub mod serde_helpers;
pub mod types;

// Re-exports
pub use draft::BookingDraft;
pub use record::{AdvanceRecord, BookingRecord, StatusChangeRecord, SubmitRequest};
pub use types::*;
