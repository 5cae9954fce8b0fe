//! Payment primitives.
//!
//! A `Payment` is one expense event against a list; its cost is distributed
//! over the members via the `paid_by` entries. The entries are persisted in
//! their own table (`paid_by_entries`) and joined back when loading.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, PaidByEntry, PaymentCategory};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub list_id: String,
    pub amount_minor: i64,
    pub payment_for: String,
    pub category: PaymentCategory,
    pub is_equally_paid: bool,
    pub paid_by: Vec<PaidByEntry>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub list_id: String,
    pub amount_minor: i64,
    pub payment_for: String,
    pub category: String,
    pub is_equally_paid: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lists::Entity",
        from = "Column::ListId",
        to = "super::lists::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Lists,
    #[sea_orm(has_many = "super::paid_by::Entity")]
    PaidByEntries,
}

impl Related<super::lists::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lists.def()
    }
}

impl Related<super::paid_by::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaidByEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Payment> for ActiveModel {
    fn from(payment: &Payment) -> Self {
        Self {
            id: ActiveValue::Set(payment.id.to_string()),
            list_id: ActiveValue::Set(payment.list_id.clone()),
            amount_minor: ActiveValue::Set(payment.amount_minor),
            payment_for: ActiveValue::Set(payment.payment_for.clone()),
            category: ActiveValue::Set(payment.category.as_str().to_string()),
            is_equally_paid: ActiveValue::Set(payment.is_equally_paid),
            created_at: ActiveValue::Set(payment.created_at),
        }
    }
}

impl TryFrom<Model> for Payment {
    type Error = EngineError;

    /// Converts a stored row into a `Payment` with an empty `paid_by`; the
    /// loader fills the entries from the `paid_by_entries` table.
    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("payment not exists".to_string()))?,
            list_id: model.list_id,
            amount_minor: model.amount_minor,
            payment_for: model.payment_for,
            category: PaymentCategory::try_from(model.category.as_str())?,
            is_equally_paid: model.is_equally_paid,
            paid_by: Vec::new(),
            created_at: model.created_at,
        })
    }
}
