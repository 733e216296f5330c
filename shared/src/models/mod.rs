//! Data models
//!
//! Shared between booking-engine and the booking front-end (via JSON).

pub mod rate;
pub mod role;

// Re-exports
pub use rate::*;
pub use role::*;
