//! Per-member contribution entries.
//!
//! One row per (payment, member) pair: the share of the payment's cost
//! attributed to that member. The settlement pipeline reads nothing else.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One member's contribution toward one payment. `amount_minor >= 0`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaidByEntry {
    pub member: String,
    pub amount_minor: i64,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "paid_by_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub payment_id: String,
    pub member: String,
    pub amount_minor: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::payments::Entity",
        from = "Column::PaymentId",
        to = "super::payments::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Payments,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::Member",
        to = "super::users::Column::Username",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Builds the row for one entry of a payment.
    pub(crate) fn active_for(payment_id: Uuid, entry: &PaidByEntry) -> ActiveModel {
        ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            payment_id: ActiveValue::Set(payment_id.to_string()),
            member: ActiveValue::Set(entry.member.clone()),
            amount_minor: ActiveValue::Set(entry.amount_minor),
        }
    }
}

impl From<Model> for PaidByEntry {
    fn from(model: Model) -> Self {
        Self {
            member: model.member,
            amount_minor: model.amount_minor,
        }
    }
}
