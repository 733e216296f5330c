use shared::booking::BookingStatus;
use shared::error::{AppError, ErrorCode};
use shared::models::{FoodType, RatePlan};
use thiserror::Error;

/// Errors surfaced by the reconciler
///
/// Everything else (bad numbers, over-cap discounts, unknown ledger rows) is
/// absorbed by clamping or defaulting and never reaches the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingError {
    #[error("No rate defined for {food_type} on the {rate_plan} plan")]
    RateNotFound {
        food_type: FoodType,
        rate_plan: RatePlan,
    },

    #[error("Admin role required: {0}")]
    PermissionDenied(String),

    #[error("Status change from {from} to {to} is not allowed")]
    InvalidStatusTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    /// A money value left the range of exact decimal arithmetic
    #[error("Amount out of range: {0}")]
    AmountOutOfRange(&'static str),
}

pub type Result<T> = std::result::Result<T, BookingError>;

impl BookingError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::RateNotFound { .. } => ErrorCode::RateNotFound,
            Self::PermissionDenied(_) => ErrorCode::AdminRequired,
            Self::InvalidStatusTransition { .. } => ErrorCode::InvalidStatusTransition,
            Self::AmountOutOfRange(_) => ErrorCode::ValueOutOfRange,
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        let app = AppError::with_message(err.code(), err.to_string());
        match err {
            BookingError::RateNotFound {
                food_type,
                rate_plan,
            } => app
                .with_detail("foodType", food_type.as_str())
                .with_detail("ratePlan", rate_plan.as_str()),
            BookingError::PermissionDenied(_) => app,
            BookingError::InvalidStatusTransition { from, to } => app
                .with_detail("from", from.as_str())
                .with_detail("to", to.as_str()),
            BookingError::AmountOutOfRange(field) => app.with_detail("field", field),
        }
    }
}
