use tracing::info;

use crate::{
    api::{ApiClient, check_status, read_json, unreachable},
    app_error::AppError,
    domain::AccountType,
    models::{AccountDetails, AccountUpdate},
};

pub async fn get_account(
    client: &ApiClient,
    id: u64,
    account_type: AccountType,
) -> Result<AccountDetails, AppError> {
    let response = client
        .http()
        .get(client.endpoint(&format!("/account/{id}")))
        .query(&[("type", account_type.as_str())])
        .send()
        .await
        .map_err(unreachable)?;

    read_json(response).await
}

pub async fn update_account(
    client: &ApiClient,
    id: u64,
    update: &AccountUpdate,
) -> Result<(), AppError> {
    let response = client
        .http()
        .post(client.endpoint(&format!("/account/{id}")))
        .json(update)
        .send()
        .await
        .map_err(unreachable)?;

    check_status(response).await?;
    info!("Updated {} account #{}", update.account_type, id);
    Ok(())
}
