use anyhow::Context;
use tracing::info;

use crate::{
    api::{ApiClient, check_status, unreachable},
    app_error::AppError,
    models::{LoginRequest, LoginResponse, UserToken},
};

/// Exchanges credentials for the user's identity.
///
/// A 401, or a 2xx body with `success: false`, is [`AppError::InvalidCredentials`].
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<UserToken, AppError> {
    let response = client
        .http()
        .post(client.endpoint("/login"))
        .json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
        .send()
        .await
        .map_err(unreachable)?;

    let response = match check_status(response).await {
        Ok(response) => response,
        Err(AppError::NotAuthenticated) => return Err(AppError::InvalidCredentials),
        Err(err) => return Err(err),
    };

    let body = response
        .json::<LoginResponse>()
        .await
        .context("Failed to parse JSON")?;

    if !body.success {
        return Err(AppError::InvalidCredentials);
    }

    info!("Logged in user #{}", body.user_id.unwrap_or_default());
    Ok(UserToken {
        user_id: body.user_id.unwrap_or_default(),
        customer_id: body.customer_id,
        courier_id: body.courier_id,
    })
}
