//! User registration endpoint and the user entity the auth middleware
//! resolves requests against.

use api_types::user::{Register, UserCreated};
use axum::{Json, extract::State, http::StatusCode};
use sea_orm::entity::prelude::*;

use crate::{ServerError, server::ServerState};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
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

/// Handle requests for creating a new user.
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<Register>,
) -> Result<(StatusCode, Json<UserCreated>), ServerError> {
    let member = state
        .engine
        .register_user(
            &payload.username,
            payload.nickname.as_deref(),
            &payload.password,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserCreated {
            username: member.username,
            nickname: member.nickname,
        }),
    ))
}
