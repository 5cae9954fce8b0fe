//! Access checks and loaders shared by the engine operations.
//!
//! Every public operation resolves the acting user against the target list
//! here before touching anything else.

use std::collections::HashMap;

use sea_orm::{DatabaseTransaction, QueryFilter, QueryOrder, prelude::*};

use crate::{
    EngineError, Payment, ResultEngine, list_members, lists, paid_by, payments, users,
    users::Member,
};

use super::Engine;

impl Engine {
    pub(super) async fn require_user_exists(
        &self,
        db: &DatabaseTransaction,
        username: &str,
    ) -> ResultEngine<users::Model> {
        users::Entity::find_by_id(username.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))
    }

    /// Returns the list if it exists and the user is a member.
    pub(super) async fn require_list_member(
        &self,
        db: &DatabaseTransaction,
        list_id: &str,
        user_id: &str,
    ) -> ResultEngine<lists::Model> {
        let list = lists::Entity::find_by_id(list_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("list not exists".to_string()))?;

        let membership =
            list_members::Entity::find_by_id((list_id.to_string(), user_id.to_string()))
                .one(db)
                .await?;
        if membership.is_none() {
            return Err(EngineError::Forbidden(
                "not a member of this list".to_string(),
            ));
        }

        Ok(list)
    }

    /// Returns the list if it exists and the user created it.
    pub(super) async fn require_list_creator(
        &self,
        db: &DatabaseTransaction,
        list_id: &str,
        user_id: &str,
    ) -> ResultEngine<lists::Model> {
        let list = lists::Entity::find_by_id(list_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("list not exists".to_string()))?;
        if list.creator != user_id {
            return Err(EngineError::Forbidden(
                "only the list creator may do this".to_string(),
            ));
        }
        Ok(list)
    }

    /// The usernames of a list's member set.
    pub(super) async fn member_usernames(
        &self,
        db: &DatabaseTransaction,
        list_id: &str,
    ) -> ResultEngine<Vec<String>> {
        let rows = list_members::Entity::find()
            .filter(list_members::Column::ListId.eq(list_id.to_string()))
            .order_by_asc(list_members::Column::UserId)
            .all(db)
            .await?;
        Ok(rows.into_iter().map(|row| row.user_id).collect())
    }

    /// The member set with display data joined from `users`.
    pub(super) async fn load_members(
        &self,
        db: &DatabaseTransaction,
        list_id: &str,
    ) -> ResultEngine<Vec<Member>> {
        let usernames = self.member_usernames(db, list_id).await?;
        let rows = users::Entity::find()
            .filter(users::Column::Username.is_in(usernames.clone()))
            .all(db)
            .await?;

        let mut by_username: HashMap<String, users::Model> = rows
            .into_iter()
            .map(|model| (model.username.clone(), model))
            .collect();

        Ok(usernames
            .into_iter()
            .filter_map(|username| by_username.remove(&username))
            .map(Member::from)
            .collect())
    }

    /// Loads a list's full payment history, `paid_by` entries populated,
    /// oldest first.
    pub(super) async fn load_payments(
        &self,
        db: &DatabaseTransaction,
        list_id: &str,
    ) -> ResultEngine<Vec<Payment>> {
        let payment_models = payments::Entity::find()
            .filter(payments::Column::ListId.eq(list_id.to_string()))
            .order_by_asc(payments::Column::CreatedAt)
            .order_by_asc(payments::Column::Id)
            .all(db)
            .await?;

        let payment_ids: Vec<String> = payment_models.iter().map(|m| m.id.clone()).collect();
        let entry_models = paid_by::Entity::find()
            .filter(paid_by::Column::PaymentId.is_in(payment_ids))
            .order_by_asc(paid_by::Column::Member)
            .all(db)
            .await?;

        let mut entries_by_payment: HashMap<String, Vec<paid_by::Model>> = HashMap::new();
        for entry in entry_models {
            entries_by_payment
                .entry(entry.payment_id.clone())
                .or_default()
                .push(entry);
        }

        let mut out = Vec::with_capacity(payment_models.len());
        for model in payment_models {
            let entries = entries_by_payment.remove(&model.id).unwrap_or_default();
            let mut payment = Payment::try_from(model)?;
            payment.paid_by = entries.into_iter().map(Into::into).collect();
            out.push(payment);
        }
        Ok(out)
    }

    /// Loads one payment of a list, entries populated.
    pub(super) async fn load_payment(
        &self,
        db: &DatabaseTransaction,
        list_id: &str,
        payment_id: &str,
    ) -> ResultEngine<Payment> {
        let model = payments::Entity::find_by_id(payment_id.to_string())
            .filter(payments::Column::ListId.eq(list_id.to_string()))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("payment not exists".to_string()))?;

        let entry_models = paid_by::Entity::find()
            .filter(paid_by::Column::PaymentId.eq(payment_id.to_string()))
            .order_by_asc(paid_by::Column::Member)
            .all(db)
            .await?;

        let mut payment = Payment::try_from(model)?;
        payment.paid_by = entry_models.into_iter().map(Into::into).collect();
        Ok(payment)
    }
}
