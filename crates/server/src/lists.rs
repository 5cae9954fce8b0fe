//! List API endpoints

use api_types::list::{
    ListDetailResponse, ListNew, ListRename, ListView, ListsQuery, ListsResponse, MemberView,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{ServerError, payments::map_payment, server::ServerState, user};

pub(crate) fn map_member(member: engine::Member) -> MemberView {
    MemberView {
        username: member.username,
        nickname: member.nickname,
    }
}

pub(crate) fn map_list(list: engine::List) -> ListView {
    ListView {
        id: list.id,
        name: list.name,
        share_code: list.share_code,
        total_amount_minor: list.total_amount_minor,
        members: list.members.into_iter().map(map_member).collect(),
    }
}

/// Handle requests for browsing the caller's lists.
pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(query): Query<ListsQuery>,
) -> Result<Json<ListsResponse>, ServerError> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);

    let lists = state
        .engine
        .lists_for_user(&user.username, page, limit)
        .await?;

    Ok(Json(ListsResponse {
        lists: lists.into_iter().map(map_list).collect(),
    }))
}

/// Handle requests for creating a new list.
pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<ListNew>,
) -> Result<(StatusCode, Json<ListView>), ServerError> {
    let list = state.engine.create_list(&payload.name, &user.username).await?;
    Ok((StatusCode::CREATED, Json(map_list(list))))
}

/// Handle requests for one list with its payment history.
pub async fn detail(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(list_id): Path<String>,
) -> Result<Json<ListDetailResponse>, ServerError> {
    let (list, payments) = state.engine.list_detail(&list_id, &user.username).await?;

    let payments = payments
        .into_iter()
        .map(map_payment)
        .collect::<Result<Vec<_>, ServerError>>()?;

    Ok(Json(ListDetailResponse {
        list: map_list(list),
        payments,
    }))
}

/// Handle requests for renaming a list.
pub async fn rename(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(list_id): Path<String>,
    Json(payload): Json<ListRename>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .rename_list(&list_id, &payload.name, &user.username)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handle requests for joining a list by share code.
pub async fn join(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> Result<Json<ListView>, ServerError> {
    let list = state.engine.join_list(&code, &user.username).await?;
    Ok(Json(map_list(list)))
}

/// Handle requests for deleting a list (creator only).
pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(list_id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_list(&list_id, &user.username).await?;
    Ok(StatusCode::NO_CONTENT)
}
