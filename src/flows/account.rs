use crate::{
    api::{self, ApiClient},
    app_error::AppError,
    domain::{
        AccountType,
        account::{format_phone_number, is_valid_email, raw_phone_number},
    },
    flows::active_session,
    models::AccountUpdate,
    session::SessionStore,
};

/// Account details for the active role, phone already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountView {
    pub account_type: AccountType,
    /// Login email, read only.
    pub primary_email: String,
    pub account_email: String,
    pub account_phone: String,
}

pub async fn load_account(
    client: &ApiClient,
    store: &dyn SessionStore,
) -> Result<AccountView, AppError> {
    let session = active_session(store)?;
    let details = api::accounts::get_account(client, session.role_id, session.account_type).await?;

    Ok(AccountView {
        account_type: session.account_type,
        primary_email: details.primary_email,
        account_email: details.account_email,
        account_phone: format_phone_number(&details.account_phone),
    })
}

/// Saves the role-specific email and phone. The phone is sent as digits only.
pub async fn update_account(
    client: &ApiClient,
    store: &dyn SessionStore,
    account_email: &str,
    account_phone: &str,
) -> Result<(), AppError> {
    if !is_valid_email(account_email) {
        return Err(AppError::InvalidInput(
            "Please enter a valid email address.".into(),
        ));
    }
    let session = active_session(store)?;
    let update = AccountUpdate {
        account_email: account_email.to_string(),
        account_phone: raw_phone_number(account_phone),
        account_type: session.account_type,
    };
    api::accounts::update_account(client, session.role_id, &update).await
}
