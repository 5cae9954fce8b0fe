//! Users table (minimal entity).
//!
//! The engine stores list memberships and `paid_by` attribution by `user_id`,
//! which is the username.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    pub nickname: String,
    pub password: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A list member as shown to clients (no credentials).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub username: String,
    pub nickname: String,
}

impl From<Model> for Member {
    fn from(model: Model) -> Self {
        Self {
            username: model.username,
            nickname: model.nickname,
        }
    }
}
