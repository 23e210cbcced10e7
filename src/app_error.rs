use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::{
    domain::OrderStatus,
    models::{ApiErrorBody, OrderId, ProductId},
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} is unreachable")]
    ServiceUnreachable(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not authenticated")]
    NotAuthenticated,

    #[error("Resource not found")]
    NotFound,

    #[error("Request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    #[error("Order #{0} cannot be rated")]
    RatingNotAllowed(OrderId),

    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Short text suitable for an alert shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            AppError::ServiceUnreachable(_) => {
                "An error occurred. Please check your connection and try again.".into()
            }
            AppError::InvalidCredentials => "Invalid email or password.".into(),
            AppError::NotAuthenticated => "User not authenticated. Please log in again.".into(),
            AppError::NotFound => "The requested item could not be found.".into(),
            AppError::Rejected { message, .. } => message.clone(),
            AppError::InvalidInput(message) => message.clone(),
            AppError::UnknownProduct(_) => {
                "Your order contains an item that is no longer available.".into()
            }
            AppError::RatingNotAllowed(_) => {
                "Only delivered orders can be rated, and only once.".into()
            }
            AppError::InvalidTransition { .. } => self.to_string(),
            AppError::Other(_) => "Something went wrong. Please try again later.".into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ServiceUnreachable(_) => StatusCode::BAD_GATEWAY,
            AppError::InvalidCredentials | AppError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Rejected { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST)
            }
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownProduct(_)
            | AppError::RatingNotAllowed(_)
            | AppError::InvalidTransition { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{:?}", self);
        }
        let body = ApiErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_error_names_both_statuses() {
        let err = AppError::InvalidTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Pending,
        };
        assert_eq!(err.to_string(), "Cannot move order from delivered to pending");
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn rejected_keeps_backend_status_and_message() {
        let err = AppError::Rejected {
            status: 409,
            message: "Email already in use".into(),
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.user_message(), "Email already in use");
    }

    #[test]
    fn unexpected_errors_hide_details_from_users() {
        let err = AppError::from(anyhow::anyhow!("disk on fire"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.user_message().contains("disk"));
    }
}
