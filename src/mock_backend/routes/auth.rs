use axum::{Json, extract::State};
use tracing::info;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{
    app_error::AppError,
    mock_backend::MockState,
    models::{ApiErrorBody, LoginRequest, LoginResponse},
};

pub fn routes_with_openapi() -> OpenApiRouter<MockState> {
    OpenApiRouter::new().routes(routes!(login))
}

/// Check credentials and return the user's role ids.
#[utoipa::path(
    post,
    path = "/login",
    tags = ["Auth"],
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Invalid email or password", body = ApiErrorBody)
    )
)]
async fn login(
    State(state): State<MockState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let data = state.lock().await;
    let user = data
        .users
        .iter()
        .find(|user| user.email.eq_ignore_ascii_case(request.email.trim()))
        .filter(|user| user.password == request.password)
        .ok_or(AppError::InvalidCredentials)?;

    info!("User #{} logged in", user.user_id);
    Ok(Json(LoginResponse {
        success: true,
        user_id: Some(user.user_id),
        customer_id: user.customer_id,
        courier_id: user.courier_id,
    }))
}
