use crate::pricing::{DiscountPolicy, RateTable};
use shared::booking::BookingStatus;
use shared::models::Role;

/// Everything a recompute depends on besides the draft itself
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileContext {
    pub rates: RateTable,
    pub discount: DiscountPolicy,
    /// Role of the operator editing the draft
    pub role: Role,
    /// Status of a booking with no advance and no manual choice
    pub fallback_status: BookingStatus,
    pub manual_status_requires_admin: bool,
}

impl ReconcileContext {
    /// Built-in rates and default policy for `role`
    pub fn new(role: Role) -> Self {
        Self {
            rates: RateTable::default(),
            discount: DiscountPolicy::default(),
            role,
            fallback_status: BookingStatus::Enquiry,
            manual_status_requires_admin: false,
        }
    }
}

impl Default for ReconcileContext {
    fn default() -> Self {
        Self::new(Role::default())
    }
}
