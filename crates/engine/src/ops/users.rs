//! User registration.

use sea_orm::{ActiveValue, prelude::*};

use crate::{
    EngineError, ResultEngine,
    users::{self, Member},
};

use super::{Engine, normalize_required_name};

impl Engine {
    /// Registers a user. Usernames are stored trimmed and lowercased; a
    /// blank nickname falls back to the username.
    pub async fn register_user(
        &self,
        username: &str,
        nickname: Option<&str>,
        password: &str,
    ) -> ResultEngine<Member> {
        let username = normalize_required_name(username, "username")?.to_lowercase();
        let password = normalize_required_name(password, "password")?;
        let nickname = nickname
            .map(str::trim)
            .filter(|nickname| !nickname.is_empty())
            .unwrap_or(username.as_str())
            .to_string();

        self.with_tx(|_, db_tx| {
            Box::pin(async move {
                if users::Entity::find_by_id(username.clone())
                    .one(db_tx)
                    .await?
                    .is_some()
                {
                    return Err(EngineError::ExistingKey(username));
                }

                let model = users::ActiveModel {
                    username: ActiveValue::Set(username),
                    nickname: ActiveValue::Set(nickname),
                    password: ActiveValue::Set(password),
                }
                .insert(db_tx)
                .await?;

                Ok(Member::from(model))
            })
        })
        .await
    }
}
