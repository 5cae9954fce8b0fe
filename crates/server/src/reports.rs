//! Reporting API endpoints: aggregated spend and the settlement plan.

use api_types::report::{PayableView, PayablesResponse, SpendResponse, SpendView};
use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::{ServerError, server::ServerState, user};

/// Handle requests for per-member aggregated spend.
pub async fn spend(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(list_id): Path<String>,
) -> Result<Json<SpendResponse>, ServerError> {
    let members = state
        .engine
        .member_contributions(&list_id, &user.username)
        .await?;

    Ok(Json(SpendResponse {
        members: members
            .into_iter()
            .map(|spend| SpendView {
                username: spend.username,
                nickname: spend.nickname,
                total_minor: spend.total_minor,
            })
            .collect(),
    }))
}

/// Handle requests for the settlement plan (who pays whom).
pub async fn payable(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(list_id): Path<String>,
) -> Result<Json<PayablesResponse>, ServerError> {
    let payables = state.engine.settlement_plan(&list_id, &user.username).await?;

    Ok(Json(PayablesResponse {
        transactions: payables
            .into_iter()
            .map(|payable| PayableView {
                from_user: payable.from_user,
                to_user: payable.to_user,
                amount_minor: payable.amount_minor,
            })
            .collect(),
    }))
}
