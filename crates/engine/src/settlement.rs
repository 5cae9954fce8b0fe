//! Balance aggregation and greedy settlement.
//!
//! [`aggregate_contributions`] folds a list's payment history into one total
//! per contributing member; [`compute_payables`] turns those totals into a
//! small plan of debtor-to-creditor transfers that zeroes every net balance
//! (up to rounding dust in the group average).
//!
//! Both functions are pure: results are recomputed from the payment history
//! on every call and never cached, since any payment mutation invalidates
//! them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{EngineError, Payment, ResultEngine, util::div_round_half_up};

/// A member's summed contribution across a list's payment history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberBalance {
    pub member: String,
    pub total_minor: i64,
}

/// One recommended transfer of the settlement plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payable {
    pub from_user: String,
    pub to_user: String,
    pub amount_minor: i64,
}

/// Sums every `paid_by` entry per member across the given payments.
///
/// Single pass: flatten, group by member, sum. Members appear in the order
/// they first occur in the flattened history; members with no entry anywhere
/// do not appear at all.
pub fn aggregate_contributions(payments: &[Payment]) -> Vec<MemberBalance> {
    let mut balances: Vec<MemberBalance> = Vec::new();
    let mut index_by_member: HashMap<&str, usize> = HashMap::new();

    for payment in payments {
        for entry in &payment.paid_by {
            match index_by_member.get(entry.member.as_str()) {
                Some(&index) => balances[index].total_minor += entry.amount_minor,
                None => {
                    index_by_member.insert(entry.member.as_str(), balances.len());
                    balances.push(MemberBalance {
                        member: entry.member.clone(),
                        total_minor: entry.amount_minor,
                    });
                }
            }
        }
    }

    balances
}

/// Reduces member balances to a minimal plan of pairwise transfers.
///
/// Each member's net is their total contribution minus the group average
/// (rounded half-up to the cent). Creditors (net > 0) are matched against
/// debtors (net < 0) with a two-pointer greedy merge: largest creditor and
/// most indebted debtor first, the smaller remainder settled in full at each
/// step. Members already at zero take part in no transfer, and whatever dust
/// the average's rounding leaves behind stays unsettled.
///
/// Sorted greedy matching is the standard linear reduction for this problem;
/// it is treated here as minimal without claiming a proof for every edge
/// case.
pub fn compute_payables(balances: &[MemberBalance]) -> ResultEngine<Vec<Payable>> {
    if balances.is_empty() {
        return Err(EngineError::EmptyBalances);
    }

    let sum_minor: i64 = balances.iter().map(|balance| balance.total_minor).sum();
    let average_minor = div_round_half_up(sum_minor, balances.len() as i64);

    let nets: Vec<(&str, i64)> = balances
        .iter()
        .map(|balance| (balance.member.as_str(), balance.total_minor - average_minor))
        .collect();

    let mut creditors: Vec<(&str, i64)> = nets.iter().copied().filter(|&(_, net)| net > 0).collect();
    let mut debtors: Vec<(&str, i64)> = nets.iter().copied().filter(|&(_, net)| net < 0).collect();

    // The ordering drives which pairs settle first; the member-id tie-break
    // keeps the plan deterministic regardless of input order.
    creditors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    debtors.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));

    let mut transactions = Vec::new();
    let mut cred_index = 0;
    let mut debt_index = 0;

    while cred_index < creditors.len() && debt_index < debtors.len() {
        let amt_minor;

        if creditors[cred_index].1 < debtors[debt_index].1.abs() {
            amt_minor = creditors[cred_index].1;
            debtors[debt_index].1 += amt_minor;
            creditors[cred_index].1 = 0;
        } else {
            amt_minor = debtors[debt_index].1;
            creditors[cred_index].1 += amt_minor;
            debtors[debt_index].1 = 0;
        }

        transactions.push(Payable {
            from_user: debtors[debt_index].0.to_string(),
            to_user: creditors[cred_index].0.to_string(),
            amount_minor: amt_minor.abs(),
        });

        if creditors[cred_index].1 == 0 {
            cred_index += 1;
        }
        if debtors[debt_index].1 == 0 {
            debt_index += 1;
        }
    }

    Ok(transactions)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::{PaidByEntry, PaymentCategory};

    fn balance(member: &str, total_minor: i64) -> MemberBalance {
        MemberBalance {
            member: member.to_string(),
            total_minor,
        }
    }

    fn payable(from: &str, to: &str, amount_minor: i64) -> Payable {
        Payable {
            from_user: from.to_string(),
            to_user: to.to_string(),
            amount_minor,
        }
    }

    fn payment(total_minor: i64, shares: &[(&str, i64)]) -> Payment {
        Payment {
            id: Uuid::new_v4(),
            list_id: "list-1".to_string(),
            amount_minor: total_minor,
            payment_for: "test".to_string(),
            category: PaymentCategory::Other,
            is_equally_paid: false,
            paid_by: shares
                .iter()
                .map(|(member, amount_minor)| PaidByEntry {
                    member: member.to_string(),
                    amount_minor: *amount_minor,
                })
                .collect(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn aggregation_sums_per_member_in_first_appearance_order() {
        let payments = vec![
            payment(3000, &[("alice", 1000), ("bob", 1000), ("carol", 1000)]),
            payment(6000, &[("alice", 6000)]),
        ];

        let balances = aggregate_contributions(&payments);
        assert_eq!(
            balances,
            vec![
                balance("alice", 7000),
                balance("bob", 1000),
                balance("carol", 1000),
            ]
        );
    }

    #[test]
    fn aggregation_is_idempotent() {
        let payments = vec![
            payment(1000, &[("alice", 600), ("bob", 400)]),
            payment(500, &[("bob", 500)]),
        ];
        assert_eq!(
            aggregate_contributions(&payments),
            aggregate_contributions(&payments)
        );
    }

    #[test]
    fn aggregation_of_empty_history_is_empty() {
        assert!(aggregate_contributions(&[]).is_empty());
    }

    #[test]
    fn exact_average_settles_in_one_transaction() {
        // 90 + 30 + 60, average 60: A is owed 30, B owes 30, C sits out.
        let balances = vec![
            balance("alice", 9000),
            balance("bob", 3000),
            balance("carol", 6000),
        ];

        let plan = compute_payables(&balances).unwrap();
        assert_eq!(plan, vec![payable("bob", "alice", 3000)]);
    }

    #[test]
    fn two_debtors_pay_one_creditor() {
        // Aggregated {A: 70, B: 10, C: 10}: average 30, nets +40/-20/-20.
        let balances = vec![
            balance("alice", 7000),
            balance("bob", 1000),
            balance("carol", 1000),
        ];

        let plan = compute_payables(&balances).unwrap();
        assert_eq!(
            plan,
            vec![payable("bob", "alice", 2000), payable("carol", "alice", 2000)]
        );
    }

    #[test]
    fn plan_is_deterministic_regardless_of_input_order() {
        let forward = vec![
            balance("alice", 7000),
            balance("bob", 1000),
            balance("carol", 1000),
        ];
        let shuffled = vec![
            balance("carol", 1000),
            balance("alice", 7000),
            balance("bob", 1000),
        ];

        assert_eq!(
            compute_payables(&forward).unwrap(),
            compute_payables(&shuffled).unwrap()
        );
    }

    #[test]
    fn single_member_needs_no_transfers() {
        let plan = compute_payables(&[balance("alice", 4200)]).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn empty_balances_fail() {
        assert_eq!(compute_payables(&[]).unwrap_err(), EngineError::EmptyBalances);
    }

    #[test]
    fn rounding_dust_is_left_unsettled() {
        // Sum 1.00 over three members: average 0.33, nets +0.67/-0.33/-0.33.
        // Both debtors settle in full; the creditor keeps one cent of dust.
        let balances = vec![
            balance("alice", 100),
            balance("bob", 0),
            balance("carol", 0),
        ];

        let plan = compute_payables(&balances).unwrap();
        assert_eq!(
            plan,
            vec![payable("bob", "alice", 33), payable("carol", "alice", 33)]
        );
        let settled: i64 = plan.iter().map(|p| p.amount_minor).sum();
        assert_eq!(settled, 66);
    }

    #[test]
    fn balanced_group_yields_empty_plan() {
        let balances = vec![balance("alice", 2500), balance("bob", 2500)];
        assert!(compute_payables(&balances).unwrap().is_empty());
    }
}
