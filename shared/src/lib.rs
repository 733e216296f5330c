//! Shared types for banquet booking
//!
//! Common types used by the booking engine and the booking front-end:
//! domain models, the booking draft and its wire record, and the unified
//! error types.

pub mod booking;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use booking::{BookingDraft, BookingRecord, BookingStatus, SubmitRequest};
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
