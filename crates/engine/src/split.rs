//! Payment allocation.
//!
//! Stateless functions that turn a create/edit request into a valid,
//! fully-allocated [`Payment`]. Persisting the result (and appending it to
//! the list's history) is the caller's job; everything here is a pure
//! function of the list's member set and the request.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    EngineError, NewPayment, PaidByEntry, Payment, PaymentCategory, PaymentUpdate, ResultEngine,
    util::div_round_half_up,
};

/// Maximum tolerated gap, in minor units, between a payment's declared total
/// and the sum of its `paid_by` amounts (0.01 currency unit).
const AMOUNT_TOLERANCE_MINOR: i64 = 1;

/// Allocates a new payment against the given member set.
///
/// Equal splits are derived here: each member gets
/// `amount / member_count` rounded half-up to the cent. The rounding
/// remainder is intentionally not redistributed, so the shares may sum to a
/// few cents above or below the total.
///
/// Unequal splits are taken verbatim after validating that every payer is a
/// member and that the amounts add up to the total within
/// [`AMOUNT_TOLERANCE_MINOR`].
pub fn allocate_payment(
    list_id: &str,
    members: &[String],
    cmd: NewPayment,
    created_at: DateTime<Utc>,
) -> ResultEngine<Payment> {
    if cmd.amount_minor <= 0 {
        return Err(EngineError::InvalidAmount(
            "amount_minor must be > 0".to_string(),
        ));
    }

    let paid_by = if cmd.is_equally_paid {
        if members.is_empty() {
            return Err(EngineError::EmptyMemberSet);
        }

        let share_minor = div_round_half_up(cmd.amount_minor, members.len() as i64);
        members
            .iter()
            .map(|member| PaidByEntry {
                member: member.clone(),
                amount_minor: share_minor,
            })
            .collect()
    } else {
        let invalid = invalid_members(&cmd.paid_by, members);
        if !invalid.is_empty() {
            return Err(EngineError::InvalidMembers(invalid.join(", ")));
        }

        let total_paid_minor: i64 = cmd.paid_by.iter().map(|entry| entry.amount_minor).sum();
        if (cmd.amount_minor - total_paid_minor).abs() > AMOUNT_TOLERANCE_MINOR {
            return Err(EngineError::AmountMismatch(format!(
                "{total_paid_minor} vs {}",
                cmd.amount_minor
            )));
        }

        cmd.paid_by
    };

    Ok(Payment {
        id: Uuid::new_v4(),
        list_id: list_id.to_string(),
        amount_minor: cmd.amount_minor,
        payment_for: description_or_category(cmd.payment_for.as_deref(), cmd.category),
        category: cmd.category,
        is_equally_paid: cmd.is_equally_paid,
        paid_by,
        created_at,
    })
}

/// Applies a partial update onto an existing payment.
///
/// When the update touches `paid_by` (directly, or by flipping
/// `is_equally_paid` off), the resulting entries are re-validated against the
/// member set. The amount-sum tolerance check is a create-only rule and is
/// not re-run here.
pub fn apply_payment_update(
    members: &[String],
    existing: Payment,
    updates: PaymentUpdate,
) -> ResultEngine<Payment> {
    if updates.paid_by.is_some() || updates.is_equally_paid == Some(false) {
        let resulting = updates.paid_by.as_deref().unwrap_or(&existing.paid_by);
        let invalid = invalid_members(resulting, members);
        if !invalid.is_empty() {
            return Err(EngineError::InvalidMembers(invalid.join(", ")));
        }
    }

    let mut payment = existing;
    if let Some(amount_minor) = updates.amount_minor {
        payment.amount_minor = amount_minor;
    }
    if let Some(payment_for) = updates.payment_for {
        payment.payment_for = payment_for;
    }
    if let Some(is_equally_paid) = updates.is_equally_paid {
        payment.is_equally_paid = is_equally_paid;
    }
    if let Some(category) = updates.category {
        payment.category = category;
    }
    if let Some(paid_by) = updates.paid_by {
        payment.paid_by = paid_by;
    }
    payment.payment_for = description_or_category(Some(&payment.payment_for), payment.category);

    Ok(payment)
}

/// Returns every `paid_by` member that is not part of the list, in entry
/// order (duplicates included).
fn invalid_members(paid_by: &[PaidByEntry], members: &[String]) -> Vec<String> {
    paid_by
        .iter()
        .map(|entry| &entry.member)
        .filter(|member| !members.contains(member))
        .cloned()
        .collect()
}

/// A blank description falls back to the category's string form.
fn description_or_category(payment_for: Option<&str>, category: PaymentCategory) -> String {
    match payment_for {
        Some(description) if !description.trim().is_empty() => description.to_string(),
        _ => category.as_str().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn entry(member: &str, amount_minor: i64) -> PaidByEntry {
        PaidByEntry {
            member: member.to_string(),
            amount_minor,
        }
    }

    #[test]
    fn equal_split_rounds_per_member_without_reconciling() {
        let payment = allocate_payment(
            "list-1",
            &members(&["alice", "bob", "carol"]),
            NewPayment::equal_split(1000, PaymentCategory::Food),
            Utc::now(),
        )
        .unwrap();

        assert!(payment.is_equally_paid);
        assert_eq!(payment.paid_by.len(), 3);
        assert!(payment.paid_by.iter().all(|e| e.amount_minor == 333));
        // The shares sum to 9.99 against a 10.00 total: the one-cent rounding
        // residual is deliberately left in place.
        let sum: i64 = payment.paid_by.iter().map(|e| e.amount_minor).sum();
        assert_eq!(sum, 999);
    }

    #[test]
    fn equal_split_covers_every_member_once() {
        let payment = allocate_payment(
            "list-1",
            &members(&["alice", "bob"]),
            NewPayment::equal_split(301, PaymentCategory::Travel),
            Utc::now(),
        )
        .unwrap();

        // 3.01 / 2 = 1.505 -> 1.51 each (half-up).
        assert_eq!(
            payment.paid_by,
            vec![entry("alice", 151), entry("bob", 151)]
        );
    }

    #[test]
    fn equal_split_on_empty_member_set_fails() {
        let err = allocate_payment(
            "list-1",
            &[],
            NewPayment::equal_split(1000, PaymentCategory::Food),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err, EngineError::EmptyMemberSet);
    }

    #[test]
    fn unequal_split_is_taken_verbatim_within_tolerance() {
        let shares = vec![entry("alice", 700), entry("bob", 301)];
        let payment = allocate_payment(
            "list-1",
            &members(&["alice", "bob"]),
            NewPayment::with_shares(1000, PaymentCategory::Groceries, shares.clone()),
            Utc::now(),
        )
        .unwrap();

        // One cent off is inside the tolerance; entries are untouched.
        assert_eq!(payment.paid_by, shares);
        assert!(!payment.is_equally_paid);
    }

    #[test]
    fn unequal_split_outside_tolerance_fails() {
        let err = allocate_payment(
            "list-1",
            &members(&["alice", "bob"]),
            NewPayment::with_shares(
                1000,
                PaymentCategory::Groceries,
                vec![entry("alice", 700), entry("bob", 302)],
            ),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err, EngineError::AmountMismatch("1002 vs 1000".to_string()));
    }

    #[test]
    fn non_member_payer_is_rejected_with_the_offender_listed() {
        let err = allocate_payment(
            "list-1",
            &members(&["alice", "bob"]),
            NewPayment::with_shares(
                1000,
                PaymentCategory::Food,
                vec![entry("alice", 500), entry("charlie", 500)],
            ),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err, EngineError::InvalidMembers("charlie".to_string()));
    }

    #[test]
    fn member_payers_are_accepted() {
        let result = allocate_payment(
            "list-1",
            &members(&["alice", "bob"]),
            NewPayment::with_shares(
                1000,
                PaymentCategory::Food,
                vec![entry("alice", 500), entry("bob", 500)],
            ),
            Utc::now(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn blank_description_defaults_to_category() {
        let payment = allocate_payment(
            "list-1",
            &members(&["alice"]),
            NewPayment::equal_split(500, PaymentCategory::Utilities).payment_for("  "),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(payment.payment_for, "utilities");

        let payment = allocate_payment(
            "list-1",
            &members(&["alice"]),
            NewPayment::equal_split(500, PaymentCategory::Utilities).payment_for("electricity"),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(payment.payment_for, "electricity");
    }

    #[test]
    fn zero_amount_is_rejected() {
        let err = allocate_payment(
            "list-1",
            &members(&["alice"]),
            NewPayment::equal_split(0, PaymentCategory::Other),
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }

    fn existing_payment() -> Payment {
        allocate_payment(
            "list-1",
            &members(&["alice", "bob"]),
            NewPayment::with_shares(
                1000,
                PaymentCategory::Food,
                vec![entry("alice", 600), entry("bob", 400)],
            ),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn update_revalidates_supplied_paid_by() {
        let err = apply_payment_update(
            &members(&["alice", "bob"]),
            existing_payment(),
            PaymentUpdate {
                paid_by: Some(vec![entry("charlie", 1000)]),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err, EngineError::InvalidMembers("charlie".to_string()));
    }

    #[test]
    fn update_revalidates_existing_paid_by_when_equal_flag_is_cleared() {
        // The member set shrank after the payment was created; flipping the
        // payment to an explicit split must re-check the stored entries.
        let err = apply_payment_update(
            &members(&["alice"]),
            existing_payment(),
            PaymentUpdate {
                is_equally_paid: Some(false),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err, EngineError::InvalidMembers("bob".to_string()));
    }

    #[test]
    fn update_does_not_rerun_the_amount_sum_check() {
        // Changing only the total leaves the stored entries (which now sum to
        // 10.00 against a 50.00 total) untouched and raises no error.
        let updated = apply_payment_update(
            &members(&["alice", "bob"]),
            existing_payment(),
            PaymentUpdate {
                amount_minor: Some(5000),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(updated.amount_minor, 5000);
        assert_eq!(
            updated.paid_by,
            vec![entry("alice", 600), entry("bob", 400)]
        );
    }

    #[test]
    fn update_applies_only_present_fields() {
        let updated = apply_payment_update(
            &members(&["alice", "bob"]),
            existing_payment(),
            PaymentUpdate {
                payment_for: Some("brunch".to_string()),
                category: Some(PaymentCategory::Entertainment),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(updated.payment_for, "brunch");
        assert_eq!(updated.category, PaymentCategory::Entertainment);
        assert_eq!(updated.amount_minor, 1000);
        assert!(!updated.is_equally_paid);
    }

    #[test]
    fn update_with_blank_description_falls_back_to_category() {
        let updated = apply_payment_update(
            &members(&["alice", "bob"]),
            existing_payment(),
            PaymentUpdate {
                payment_for: Some(String::new()),
                category: Some(PaymentCategory::Rent),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(updated.payment_for, "rent");
    }
}
