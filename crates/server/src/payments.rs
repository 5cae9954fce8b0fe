//! Payment API endpoints

use api_types::payment::{PaidBy, PaymentCategory as ApiCategory, PaymentEdit, PaymentNew, PaymentView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::FixedOffset;
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};

pub(crate) fn map_category(category: engine::PaymentCategory) -> ApiCategory {
    match category {
        engine::PaymentCategory::Food => ApiCategory::Food,
        engine::PaymentCategory::Groceries => ApiCategory::Groceries,
        engine::PaymentCategory::Travel => ApiCategory::Travel,
        engine::PaymentCategory::Entertainment => ApiCategory::Entertainment,
        engine::PaymentCategory::Utilities => ApiCategory::Utilities,
        engine::PaymentCategory::Rent => ApiCategory::Rent,
        engine::PaymentCategory::Shopping => ApiCategory::Shopping,
        engine::PaymentCategory::Other => ApiCategory::Other,
    }
}

pub(crate) fn map_category_in(category: ApiCategory) -> engine::PaymentCategory {
    match category {
        ApiCategory::Food => engine::PaymentCategory::Food,
        ApiCategory::Groceries => engine::PaymentCategory::Groceries,
        ApiCategory::Travel => engine::PaymentCategory::Travel,
        ApiCategory::Entertainment => engine::PaymentCategory::Entertainment,
        ApiCategory::Utilities => engine::PaymentCategory::Utilities,
        ApiCategory::Rent => engine::PaymentCategory::Rent,
        ApiCategory::Shopping => engine::PaymentCategory::Shopping,
        ApiCategory::Other => engine::PaymentCategory::Other,
    }
}

fn map_paid_by_in(entries: Vec<PaidBy>) -> Vec<engine::PaidByEntry> {
    entries
        .into_iter()
        .map(|entry| engine::PaidByEntry {
            member: entry.member,
            amount_minor: entry.amount_minor,
        })
        .collect()
}

pub(crate) fn map_payment(payment: engine::Payment) -> Result<PaymentView, ServerError> {
    let utc = FixedOffset::east_opt(0)
        .ok_or_else(|| ServerError::Generic("invalid UTC offset".to_string()))?;

    Ok(PaymentView {
        id: payment.id,
        amount_minor: payment.amount_minor,
        payment_for: payment.payment_for,
        category: map_category(payment.category),
        is_equally_paid: payment.is_equally_paid,
        paid_by: payment
            .paid_by
            .into_iter()
            .map(|entry| PaidBy {
                member: entry.member,
                amount_minor: entry.amount_minor,
            })
            .collect(),
        created_at: payment.created_at.with_timezone(&utc),
    })
}

/// Handle requests for logging a payment against a list.
pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(list_id): Path<String>,
    Json(payload): Json<PaymentNew>,
) -> Result<(StatusCode, Json<PaymentView>), ServerError> {
    if !payload.is_equally_paid && payload.paid_by.as_ref().is_none_or(|paid_by| paid_by.is_empty()) {
        return Err(ServerError::Generic(
            "paid_by must not be empty unless is_equally_paid is set".to_string(),
        ));
    }

    let cmd = engine::NewPayment {
        amount_minor: payload.amount_minor,
        is_equally_paid: payload.is_equally_paid,
        paid_by: map_paid_by_in(payload.paid_by.unwrap_or_default()),
        category: map_category_in(payload.category),
        payment_for: payload.payment_for,
    };

    let payment = state
        .engine
        .create_payment(&list_id, &user.username, cmd)
        .await?;

    Ok((StatusCode::CREATED, Json(map_payment(payment)?)))
}

/// Handle requests for editing a payment.
pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path((list_id, payment_id)): Path<(String, Uuid)>,
    Json(payload): Json<PaymentEdit>,
) -> Result<Json<PaymentView>, ServerError> {
    let updates = engine::PaymentUpdate {
        amount_minor: payload.amount_minor,
        payment_for: payload.payment_for,
        is_equally_paid: payload.is_equally_paid,
        category: payload.category.map(map_category_in),
        paid_by: payload.paid_by.map(map_paid_by_in),
    };

    let payment = state
        .engine
        .update_payment(&list_id, payment_id, &user.username, updates)
        .await?;

    Ok(Json(map_payment(payment)?))
}

/// Handle requests for deleting a payment.
pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path((list_id, payment_id)): Path<(String, Uuid)>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .delete_payment(&list_id, payment_id, &user.username)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
