//! Booking Pricing Module
//!
//! Rate table lookup, role-based discount caps, and the per-plate rate /
//! total formulas shared by every booking form.

mod calculator;
pub mod discount;
mod rate_table;

pub use calculator::*;
pub use discount::{DiscountCap, DiscountPolicy};
pub use rate_table::RateTable;
