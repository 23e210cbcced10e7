//! In-memory stand-in for the delivery REST backend.
//!
//! Serves the same endpoints the client calls, with seeded users, restaurants,
//! menus and orders. Used by the integration tests and by the `mock-backend`
//! binary for local demos. It enforces the same lifecycle rules the client
//! does: status moves one step forward at a time and an order is rated at
//! most once.

pub mod routes;
pub mod seed;
pub mod state;

use std::io;

use axum::{Json, Router, routing};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::openapi::{InfoBuilder, OpenApi};
use utoipa_axum::router::OpenApiRouter;

pub use state::{MockData, MockState};

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Every backend route under `/api`, with its OpenAPI description.
pub fn routes_with_openapi() -> OpenApiRouter<MockState> {
    OpenApiRouter::new().nest(
        "/api",
        routes::auth::routes_with_openapi()
            .merge(routes::accounts::routes_with_openapi())
            .merge(routes::restaurants::routes_with_openapi())
            .merge(routes::orders::routes_with_openapi())
            .merge(routes::deliveries::routes_with_openapi()),
    )
}

pub fn openapi() -> OpenApi {
    let (_, mut openapi) = routes_with_openapi().split_for_parts();
    openapi.info = InfoBuilder::new()
        .title("Delivery mock backend")
        .version("1.0.0")
        .build();
    openapi
}

/// The complete application: routes, OpenAPI document and request tracing.
pub fn app(state: MockState) -> Router {
    let (router, _) = routes_with_openapi().split_for_parts();
    let doc = openapi();

    router
        .route(
            OPENAPI_PATH,
            routing::get(move || {
                let doc = doc.clone();
                async move { Json(doc) }
            }),
        )
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Serves [`app`] on an already bound listener until the task is dropped.
pub async fn serve(listener: TcpListener, state: MockState) -> io::Result<()> {
    axum::serve(listener, app(state)).await
}
