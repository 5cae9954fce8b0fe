//! List operations: create, browse, rename, join, delete.

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, QuerySelect, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Payment, ResultEngine, list_members,
    lists::{self, List},
    util::generate_share_code,
};

use super::{Engine, normalize_required_name};

impl Engine {
    /// Creates a list owned by `user_id`, with the creator as its first
    /// member and a fresh share code for inviting others.
    pub async fn create_list(&self, name: &str, user_id: &str) -> ResultEngine<List> {
        let name = normalize_required_name(name, "list name")?;
        let user_id = user_id.to_string();
        self.with_tx(|engine, db_tx| {
            Box::pin(async move {
                let creator = engine.require_user_exists(db_tx, user_id.as_str()).await?;

                let list = List {
                    id: Uuid::new_v4().to_string(),
                    name,
                    creator: user_id.clone(),
                    share_code: generate_share_code(),
                    total_amount_minor: 0,
                    members: vec![creator.into()],
                };

                lists::ActiveModel::from(&list).insert(db_tx).await?;
                list_members::ActiveModel {
                    list_id: ActiveValue::Set(list.id.clone()),
                    user_id: ActiveValue::Set(user_id),
                }
                .insert(db_tx)
                .await?;

                Ok(list)
            })
        })
        .await
    }

    /// Lists the user is a member of, paginated (1-based page).
    pub async fn lists_for_user(
        &self,
        user_id: &str,
        page: u64,
        limit: u64,
    ) -> ResultEngine<Vec<List>> {
        let user_id = user_id.to_string();
        let page = page.max(1);
        self.with_tx(|engine, db_tx| {
            Box::pin(async move {
                engine.require_user_exists(db_tx, user_id.as_str()).await?;

                let memberships = list_members::Entity::find()
                    .filter(list_members::Column::UserId.eq(user_id))
                    .all(db_tx)
                    .await?;
                let list_ids: Vec<String> =
                    memberships.into_iter().map(|row| row.list_id).collect();

                let models = lists::Entity::find()
                    .filter(lists::Column::Id.is_in(list_ids))
                    .order_by_asc(lists::Column::Id)
                    .offset((page - 1) * limit)
                    .limit(limit)
                    .all(db_tx)
                    .await?;

                let mut out = Vec::with_capacity(models.len());
                for model in models {
                    let mut list = List::from(model);
                    list.members = engine.load_members(db_tx, &list.id).await?;
                    out.push(list);
                }
                Ok(out)
            })
        })
        .await
    }

    /// One list with members and full payment history.
    pub async fn list_detail(
        &self,
        list_id: &str,
        user_id: &str,
    ) -> ResultEngine<(List, Vec<Payment>)> {
        let list_id = list_id.to_string();
        let user_id = user_id.to_string();
        self.with_tx(|engine, db_tx| {
            Box::pin(async move {
                let model = engine
                    .require_list_member(db_tx, list_id.as_str(), user_id.as_str())
                    .await?;

                let mut list = List::from(model);
                list.members = engine.load_members(db_tx, list_id.as_str()).await?;
                let payments = engine.load_payments(db_tx, list_id.as_str()).await?;
                Ok((list, payments))
            })
        })
        .await
    }

    /// Renames a list (any member).
    pub async fn rename_list(&self, list_id: &str, name: &str, user_id: &str) -> ResultEngine<()> {
        let list_id = list_id.to_string();
        let name = normalize_required_name(name, "list name")?;
        let user_id = user_id.to_string();
        self.with_tx(|engine, db_tx| {
            Box::pin(async move {
                engine
                    .require_list_member(db_tx, list_id.as_str(), user_id.as_str())
                    .await?;

                lists::ActiveModel {
                    id: ActiveValue::Set(list_id),
                    name: ActiveValue::Set(name),
                    ..Default::default()
                }
                .update(db_tx)
                .await?;
                Ok(())
            })
        })
        .await
    }

    /// Joins a list by its share code. Joining a list you already belong to
    /// is a no-op success.
    pub async fn join_list(&self, share_code: &str, user_id: &str) -> ResultEngine<List> {
        let share_code = share_code.to_string();
        let user_id = user_id.to_string();
        self.with_tx(|engine, db_tx| {
            Box::pin(async move {
                engine.require_user_exists(db_tx, user_id.as_str()).await?;

                let model = lists::Entity::find()
                    .filter(lists::Column::ShareCode.eq(share_code))
                    .one(db_tx)
                    .await?
                    .ok_or_else(|| {
                        EngineError::KeyNotFound("no list with this code".to_string())
                    })?;

                let already_member =
                    list_members::Entity::find_by_id((model.id.clone(), user_id.clone()))
                        .one(db_tx)
                        .await?
                        .is_some();
                if !already_member {
                    list_members::ActiveModel {
                        list_id: ActiveValue::Set(model.id.clone()),
                        user_id: ActiveValue::Set(user_id),
                    }
                    .insert(db_tx)
                    .await?;
                }

                let mut list = List::from(model);
                list.members = engine.load_members(db_tx, &list.id).await?;
                Ok(list)
            })
        })
        .await
    }

    /// Deletes a list (creator only). Memberships, payments and their
    /// `paid_by` entries go with it via the schema's cascades.
    pub async fn delete_list(&self, list_id: &str, user_id: &str) -> ResultEngine<()> {
        let list_id = list_id.to_string();
        let user_id = user_id.to_string();
        self.with_tx(|engine, db_tx| {
            Box::pin(async move {
                engine
                    .require_list_creator(db_tx, list_id.as_str(), user_id.as_str())
                    .await?;

                lists::Entity::delete_by_id(list_id).exec(db_tx).await?;
                Ok(())
            })
        })
        .await
    }
}
