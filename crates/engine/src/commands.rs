//! Command structs for engine operations.
//!
//! These types group parameters for payment writes, keeping call sites
//! readable and avoiding long argument lists. `PaymentUpdate` is also the
//! whitelist of editable fields: anything not representable here cannot be
//! changed after creation.

use crate::{PaidByEntry, PaymentCategory};

/// Create a payment against a list.
#[derive(Clone, Debug)]
pub struct NewPayment {
    pub amount_minor: i64,
    pub is_equally_paid: bool,
    /// Ignored (and replaced by the computed equal split) when
    /// `is_equally_paid` is set.
    pub paid_by: Vec<PaidByEntry>,
    pub category: PaymentCategory,
    pub payment_for: Option<String>,
}

impl NewPayment {
    #[must_use]
    pub fn equal_split(amount_minor: i64, category: PaymentCategory) -> Self {
        Self {
            amount_minor,
            is_equally_paid: true,
            paid_by: Vec::new(),
            category,
            payment_for: None,
        }
    }

    #[must_use]
    pub fn with_shares(
        amount_minor: i64,
        category: PaymentCategory,
        paid_by: Vec<PaidByEntry>,
    ) -> Self {
        Self {
            amount_minor,
            is_equally_paid: false,
            paid_by,
            category,
            payment_for: None,
        }
    }

    #[must_use]
    pub fn payment_for(mut self, description: impl Into<String>) -> Self {
        self.payment_for = Some(description.into());
        self
    }
}

/// Partial update of an existing payment.
///
/// Absent fields keep their prior values.
#[derive(Clone, Debug, Default)]
pub struct PaymentUpdate {
    pub amount_minor: Option<i64>,
    pub payment_for: Option<String>,
    pub is_equally_paid: Option<bool>,
    pub category: Option<PaymentCategory>,
    pub paid_by: Option<Vec<PaidByEntry>>,
}
