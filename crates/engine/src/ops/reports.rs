//! Reporting operations: aggregated spend and the settlement plan.
//!
//! Thin adapters over [`crate::settlement`]: load the payment history inside
//! the transaction snapshot, hand it to the pure functions, decorate the
//! result for display.

use std::collections::HashMap;

use sea_orm::{QueryFilter, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    Payable, ResultEngine,
    settlement::{aggregate_contributions, compute_payables},
    users,
};

use super::Engine;

/// A member's aggregated contribution, with display data joined in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSpend {
    pub username: String,
    pub nickname: String,
    pub total_minor: i64,
}

impl Engine {
    /// Sums each member's contributions across a list's payment history.
    pub async fn member_contributions(
        &self,
        list_id: &str,
        user_id: &str,
    ) -> ResultEngine<Vec<MemberSpend>> {
        let list_id = list_id.to_string();
        let user_id = user_id.to_string();
        self.with_tx(|engine, db_tx| {
            Box::pin(async move {
                engine
                    .require_list_member(db_tx, list_id.as_str(), user_id.as_str())
                    .await?;

                let payments = engine.load_payments(db_tx, list_id.as_str()).await?;
                let balances = aggregate_contributions(&payments);

                let usernames: Vec<String> =
                    balances.iter().map(|b| b.member.clone()).collect();
                let nicknames: HashMap<String, String> = users::Entity::find()
                    .filter(users::Column::Username.is_in(usernames))
                    .all(db_tx)
                    .await?
                    .into_iter()
                    .map(|user| (user.username, user.nickname))
                    .collect();

                Ok(balances
                    .into_iter()
                    .map(|balance| MemberSpend {
                        nickname: nicknames
                            .get(&balance.member)
                            .cloned()
                            .unwrap_or_else(|| balance.member.clone()),
                        username: balance.member,
                        total_minor: balance.total_minor,
                    })
                    .collect())
            })
        })
        .await
    }

    /// The greedy settlement plan for a list: who pays whom, and how much.
    pub async fn settlement_plan(
        &self,
        list_id: &str,
        user_id: &str,
    ) -> ResultEngine<Vec<Payable>> {
        let list_id = list_id.to_string();
        let user_id = user_id.to_string();
        self.with_tx(|engine, db_tx| {
            Box::pin(async move {
                engine
                    .require_list_member(db_tx, list_id.as_str(), user_id.as_str())
                    .await?;

                let payments = engine.load_payments(db_tx, list_id.as_str()).await?;
                let balances = aggregate_contributions(&payments);
                compute_payables(&balances)
            })
        })
        .await
    }
}
