use tracing::{error, info};

use crate::{
    api::{self, ApiClient},
    app_error::AppError,
    domain::{AccountType, Landing, account::validate_credentials},
    models::UserToken,
    session::{SELECTED_USER_TYPE_KEY, SessionStore},
};

/// The logged-in user and the role they are acting as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub token: UserToken,
    pub account_type: AccountType,
    /// Customer or courier id matching `account_type`.
    pub role_id: u64,
}

/// Validates the credentials, logs in and persists the session.
///
/// A single-role user has that role selected straight away; a user with both
/// roles lands on [`Landing::AccountSelection`] and must call [`select_account`].
pub async fn login(
    client: &ApiClient,
    store: &dyn SessionStore,
    email: &str,
    password: &str,
) -> Result<Landing, AppError> {
    validate_credentials(email, password)?;

    let token = api::auth::login(client, email, password)
        .await
        .inspect_err(|err| error!("Login failed: {}", err))?;
    let landing = token.landing()?;

    store.save_token(&token)?;
    store.remove_item(SELECTED_USER_TYPE_KEY)?;
    if let Some(account_type) = token.sole_account_type() {
        store.save_account_type(account_type)?;
    }

    info!("User #{} landing on {:?}", token.user_id, landing);
    Ok(landing)
}

/// Records which role a dual-role user is acting as.
pub fn select_account(store: &dyn SessionStore, account_type: AccountType) -> Result<(), AppError> {
    let token = store.load_token()?.ok_or(AppError::NotAuthenticated)?;
    if token.role_id(account_type).is_none() {
        return Err(AppError::InvalidInput(format!(
            "This user has no {account_type} account."
        )));
    }
    store.save_account_type(account_type)
}

pub fn logout(store: &dyn SessionStore) -> Result<(), AppError> {
    store.clear()?;
    info!("Logged out");
    Ok(())
}

pub fn active_session(store: &dyn SessionStore) -> Result<ActiveSession, AppError> {
    let token = store.load_token()?.ok_or(AppError::NotAuthenticated)?;
    let account_type = match store.load_account_type()? {
        Some(account_type) => account_type,
        None => token.sole_account_type().ok_or_else(|| {
            AppError::InvalidInput("Select a customer or courier account first.".into())
        })?,
    };
    let role_id = token
        .role_id(account_type)
        .ok_or(AppError::NotAuthenticated)?;

    Ok(ActiveSession {
        token,
        account_type,
        role_id,
    })
}

/// Like [`active_session`], but the session must be acting as `required`.
pub fn session_for(
    store: &dyn SessionStore,
    required: AccountType,
) -> Result<ActiveSession, AppError> {
    let session = active_session(store)?;
    if session.account_type != required {
        return Err(AppError::InvalidInput(format!(
            "Switch to your {required} account to do this."
        )));
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;

    fn store_with(customer_id: Option<u64>, courier_id: Option<u64>) -> MemorySessionStore {
        let store = MemorySessionStore::new();
        store
            .save_token(&UserToken {
                user_id: 1,
                customer_id,
                courier_id,
            })
            .unwrap();
        store
    }

    #[test]
    fn no_token_means_not_authenticated() {
        let store = MemorySessionStore::new();
        assert!(matches!(
            active_session(&store),
            Err(AppError::NotAuthenticated)
        ));
    }

    #[test]
    fn single_role_is_implied() {
        let store = store_with(None, Some(4));
        let session = active_session(&store).unwrap();
        assert_eq!(session.account_type, AccountType::Courier);
        assert_eq!(session.role_id, 4);
    }

    #[test]
    fn dual_role_requires_selection() {
        let store = store_with(Some(3), Some(4));
        assert!(matches!(
            active_session(&store),
            Err(AppError::InvalidInput(_))
        ));

        select_account(&store, AccountType::Customer).unwrap();
        let session = active_session(&store).unwrap();
        assert_eq!(session.role_id, 3);
    }

    #[test]
    fn cannot_select_missing_role() {
        let store = store_with(Some(3), None);
        assert!(select_account(&store, AccountType::Courier).is_err());
    }

    #[test]
    fn session_for_checks_role() {
        let store = store_with(Some(3), None);
        assert!(session_for(&store, AccountType::Customer).is_ok());
        assert!(session_for(&store, AccountType::Courier).is_err());
    }

    #[test]
    fn logout_clears_everything() {
        let store = store_with(Some(3), None);
        logout(&store).unwrap();
        assert_eq!(store.load_token().unwrap(), None);
    }
}
