//! Thin reqwest wrappers over the delivery backend's REST endpoints.

pub mod accounts;
pub mod auth;
pub mod deliveries;
pub mod orders;
pub mod products;
pub mod restaurants;

use anyhow::Context;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::error;

use crate::{app_error::AppError, config::ApiConfig, models::ApiErrorBody};

const SERVICE_NAME: &str = "DeliveryService";

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        Self::from_config(&ApiConfig {
            base_url: base_url.into(),
            timeout: None,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// `{base_url}/api{path}`
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }
}

/// Maps a transport failure to [`AppError::ServiceUnreachable`], logging the cause.
pub(crate) fn unreachable(err: reqwest::Error) -> AppError {
    error!("Request to {} failed: {}", SERVICE_NAME, err);
    AppError::ServiceUnreachable(SERVICE_NAME.into())
}

/// Turns a non-success response into an [`AppError`]; success passes through.
pub(crate) async fn check_status(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|body| body.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_string()
        });
    error!("{} responded {}: {}", SERVICE_NAME, status, message);

    Err(match status {
        StatusCode::UNAUTHORIZED => AppError::NotAuthenticated,
        StatusCode::NOT_FOUND => AppError::NotFound,
        _ => AppError::Rejected {
            status: status.as_u16(),
            message,
        },
    })
}

/// Checks the status and decodes a JSON body.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let response = check_status(response).await?;
    let value = response
        .json::<T>()
        .await
        .context("Failed to parse JSON")?;
    Ok(value)
}
