//! Expense lists.
//!
//! A `List` is a shared-expense group: a member set plus an append-only
//! payment history. The running `total_amount_minor` is bookkeeping for list
//! overviews; spend and settlement figures are always recomputed from the
//! payment history itself.

use sea_orm::{ActiveValue, entity::prelude::*};

use crate::users::Member;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct List {
    pub id: String,
    pub name: String,
    pub creator: String,
    pub share_code: String,
    pub total_amount_minor: i64,
    pub members: Vec<Member>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lists")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub creator: String,
    pub share_code: String,
    pub total_amount_minor: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
    #[sea_orm(has_many = "super::list_members::Entity")]
    Members,
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::list_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&List> for ActiveModel {
    fn from(list: &List) -> Self {
        Self {
            id: ActiveValue::Set(list.id.clone()),
            name: ActiveValue::Set(list.name.clone()),
            creator: ActiveValue::Set(list.creator.clone()),
            share_code: ActiveValue::Set(list.share_code.clone()),
            total_amount_minor: ActiveValue::Set(list.total_amount_minor),
        }
    }
}

impl From<Model> for List {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            creator: model.creator,
            share_code: model.share_code,
            total_amount_minor: model.total_amount_minor,
            members: Vec::new(),
        }
    }
}
