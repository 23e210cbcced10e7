use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::info;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{
    app_error::AppError,
    domain::{AccountType, account::is_valid_email},
    mock_backend::{MockData, MockState, state::AccountRecord},
    models::{AccountDetails, AccountQuery, AccountUpdate, ApiErrorBody},
};

pub fn routes_with_openapi() -> OpenApiRouter<MockState> {
    OpenApiRouter::new().routes(routes!(get_account, update_account))
}

fn account_mut(
    data: &mut MockData,
    id: u64,
    account_type: AccountType,
) -> Result<&mut AccountRecord, AppError> {
    let accounts = match account_type {
        AccountType::Customer => &mut data.customers,
        AccountType::Courier => &mut data.couriers,
    };
    accounts.get_mut(&id).ok_or(AppError::NotFound)
}

/// Fetch the contact details of a customer or courier account.
#[utoipa::path(
    get,
    path = "/account/{id}",
    tags = ["Accounts"],
    params(
        ("id" = u64, Path, description = "Customer or courier ID"),
        AccountQuery
    ),
    responses(
        (status = 200, description = "Account details", body = AccountDetails),
        (status = 404, description = "No such account", body = ApiErrorBody)
    )
)]
async fn get_account(
    Path(id): Path<u64>,
    Query(query): Query<AccountQuery>,
    State(state): State<MockState>,
) -> Result<Json<AccountDetails>, AppError> {
    let mut data = state.lock().await;
    let account = account_mut(&mut data, id, query.account_type)?.clone();
    let primary_email = data
        .user(account.user_id)
        .map(|user| user.email.clone())
        .unwrap_or_default();

    Ok(Json(AccountDetails {
        primary_email,
        account_email: account.email,
        account_phone: account.phone,
    }))
}

/// Replace the contact email and phone of an account.
#[utoipa::path(
    post,
    path = "/account/{id}",
    tags = ["Accounts"],
    params(
        ("id" = u64, Path, description = "Customer or courier ID")
    ),
    request_body = AccountUpdate,
    responses(
        (status = 200, description = "Account updated", body = AccountDetails),
        (status = 400, description = "Malformed email or phone", body = ApiErrorBody),
        (status = 404, description = "No such account", body = ApiErrorBody)
    )
)]
async fn update_account(
    Path(id): Path<u64>,
    State(state): State<MockState>,
    Json(update): Json<AccountUpdate>,
) -> Result<Json<AccountDetails>, AppError> {
    if !is_valid_email(&update.account_email) {
        return Err(AppError::InvalidInput("Invalid email address".into()));
    }
    let digits = &update.account_phone;
    if digits.len() != 10 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::InvalidInput(
            "Phone number must have 10 digits".into(),
        ));
    }

    let mut data = state.lock().await;
    let account = account_mut(&mut data, id, update.account_type)?;
    account.email = update.account_email;
    account.phone = update.account_phone;
    let account = account.clone();
    let primary_email = data
        .user(account.user_id)
        .map(|user| user.email.clone())
        .unwrap_or_default();

    info!("Updated {} account #{}", update.account_type, id);
    Ok(Json(AccountDetails {
        primary_email,
        account_email: account.email,
        account_phone: account.phone,
    }))
}
