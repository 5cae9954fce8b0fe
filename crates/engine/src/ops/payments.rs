//! Payment operations: create, update, delete.
//!
//! The allocation rules live in [`crate::split`]; these operations load the
//! member set, delegate, and persist the result together with the list's
//! running total.

use sea_orm::{ActiveValue, QueryFilter, prelude::*};
use uuid::Uuid;

use crate::{
    NewPayment, Payment, PaymentUpdate, ResultEngine, lists, paid_by, payments, split,
};

use super::Engine;

impl Engine {
    /// Allocates and persists a new payment against a list.
    pub async fn create_payment(
        &self,
        list_id: &str,
        user_id: &str,
        cmd: NewPayment,
    ) -> ResultEngine<Payment> {
        let list_id = list_id.to_string();
        let user_id = user_id.to_string();
        self.with_tx(|engine, db_tx| {
            Box::pin(async move {
                let list = engine
                    .require_list_member(db_tx, list_id.as_str(), user_id.as_str())
                    .await?;
                let members = engine.member_usernames(db_tx, list_id.as_str()).await?;

                let payment =
                    split::allocate_payment(list_id.as_str(), &members, cmd, chrono::Utc::now())?;

                payments::ActiveModel::from(&payment).insert(db_tx).await?;
                for entry in &payment.paid_by {
                    paid_by::Model::active_for(payment.id, entry)
                        .insert(db_tx)
                        .await?;
                }

                lists::ActiveModel {
                    id: ActiveValue::Set(list.id),
                    total_amount_minor: ActiveValue::Set(
                        list.total_amount_minor + payment.amount_minor,
                    ),
                    ..Default::default()
                }
                .update(db_tx)
                .await?;

                Ok(payment)
            })
        })
        .await
    }

    /// Applies a partial update to a payment of a list.
    pub async fn update_payment(
        &self,
        list_id: &str,
        payment_id: Uuid,
        user_id: &str,
        updates: PaymentUpdate,
    ) -> ResultEngine<Payment> {
        let list_id = list_id.to_string();
        let user_id = user_id.to_string();
        self.with_tx(|engine, db_tx| {
            Box::pin(async move {
                let list = engine
                    .require_list_member(db_tx, list_id.as_str(), user_id.as_str())
                    .await?;
                let existing = engine
                    .load_payment(db_tx, list_id.as_str(), &payment_id.to_string())
                    .await?;
                let members = engine.member_usernames(db_tx, list_id.as_str()).await?;

                let previous_amount_minor = existing.amount_minor;
                let payment = split::apply_payment_update(&members, existing, updates)?;

                payments::ActiveModel {
                    id: ActiveValue::Set(payment.id.to_string()),
                    amount_minor: ActiveValue::Set(payment.amount_minor),
                    payment_for: ActiveValue::Set(payment.payment_for.clone()),
                    category: ActiveValue::Set(payment.category.as_str().to_string()),
                    is_equally_paid: ActiveValue::Set(payment.is_equally_paid),
                    ..Default::default()
                }
                .update(db_tx)
                .await?;

                paid_by::Entity::delete_many()
                    .filter(paid_by::Column::PaymentId.eq(payment.id.to_string()))
                    .exec(db_tx)
                    .await?;
                for entry in &payment.paid_by {
                    paid_by::Model::active_for(payment.id, entry)
                        .insert(db_tx)
                        .await?;
                }

                let new_total_minor = (list.total_amount_minor - previous_amount_minor
                    + payment.amount_minor)
                    .max(0);
                lists::ActiveModel {
                    id: ActiveValue::Set(list.id),
                    total_amount_minor: ActiveValue::Set(new_total_minor),
                    ..Default::default()
                }
                .update(db_tx)
                .await?;

                Ok(payment)
            })
        })
        .await
    }

    /// Deletes a payment and takes its amount off the list total (clamped at
    /// zero).
    pub async fn delete_payment(
        &self,
        list_id: &str,
        payment_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<()> {
        let list_id = list_id.to_string();
        let user_id = user_id.to_string();
        self.with_tx(|engine, db_tx| {
            Box::pin(async move {
                let list = engine
                    .require_list_member(db_tx, list_id.as_str(), user_id.as_str())
                    .await?;
                let payment = engine
                    .load_payment(db_tx, list_id.as_str(), &payment_id.to_string())
                    .await?;

                lists::ActiveModel {
                    id: ActiveValue::Set(list.id),
                    total_amount_minor: ActiveValue::Set(
                        (list.total_amount_minor - payment.amount_minor).max(0),
                    ),
                    ..Default::default()
                }
                .update(db_tx)
                .await?;

                payments::Entity::delete_by_id(payment.id.to_string())
                    .exec(db_tx)
                    .await?;
                Ok(())
            })
        })
        .await
    }
}
