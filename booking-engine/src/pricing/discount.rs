//! Role-based discount caps
//!
//! The cap is enforced when a discount is entered, never retroactively: a
//! hydrated booking keeps whatever discount was persisted.

use shared::models::{DiscountMode, RatePlan, Role};
use std::collections::BTreeMap;

/// Maximum discount a non-admin may enter, in the units of the discount mode
/// (percentage points or rupees per plate)
#[derive(Debug, Clone, PartialEq)]
pub enum DiscountCap {
    /// Same cap for every plan
    Uniform(f64),
    /// Cap per rate plan; `fallback` applies to plans without an entry and to
    /// drafts with no plan selected yet
    PerPlan {
        caps: BTreeMap<RatePlan, f64>,
        fallback: f64,
    },
}

impl DiscountCap {
    pub fn for_plan(&self, rate_plan: Option<RatePlan>) -> f64 {
        match self {
            Self::Uniform(cap) => *cap,
            Self::PerPlan { caps, fallback } => rate_plan
                .and_then(|plan| caps.get(&plan).copied())
                .unwrap_or(*fallback),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiscountPolicy {
    pub mode: DiscountMode,
    pub staff_cap: DiscountCap,
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self {
            mode: DiscountMode::Percentage,
            staff_cap: DiscountCap::Uniform(10.0),
        }
    }
}

impl DiscountPolicy {
    /// Cap for a role; `None` means unbounded (admin)
    pub fn cap_for(&self, role: Role, rate_plan: Option<RatePlan>) -> Option<f64> {
        if role.is_admin() {
            None
        } else {
            Some(self.staff_cap.for_plan(rate_plan).max(0.0))
        }
    }

    /// Clamp a discount entered by `role` into `[0, cap]`
    pub fn clamp(&self, requested: f64, role: Role, rate_plan: Option<RatePlan>) -> f64 {
        let requested = if requested.is_finite() {
            requested.max(0.0)
        } else {
            0.0
        };

        match self.cap_for(role, rate_plan) {
            Some(cap) if requested > cap => {
                tracing::warn!(
                    requested,
                    cap,
                    ?rate_plan,
                    ?role,
                    "Discount above cap, clamped"
                );
                cap
            }
            _ => requested,
        }
    }
}
