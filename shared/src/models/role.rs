//! Role Model

use serde::{Deserialize, Serialize};

/// Role of the operator editing a booking
///
/// Passed explicitly into the reconciler; never read from ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Unbounded discounts, may cancel and reopen bookings
    Admin,
    /// Front-desk / sales staff
    #[default]
    Staff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}
