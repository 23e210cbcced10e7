use axum::{Json, extract::State};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{mock_backend::MockState, models::Delivery};

pub fn routes_with_openapi() -> OpenApiRouter<MockState> {
    OpenApiRouter::new().routes(routes!(list_deliveries))
}

/// Every order that has a courier assigned.
#[utoipa::path(
    get,
    path = "/deliveries",
    tags = ["Deliveries"],
    responses(
        (status = 200, description = "All deliveries", body = Vec<Delivery>)
    )
)]
async fn list_deliveries(State(state): State<MockState>) -> Json<Vec<Delivery>> {
    let data = state.lock().await;
    let deliveries = data
        .orders
        .values()
        .filter(|order| order.courier_id.is_some())
        .map(|order| Delivery {
            id: order.id,
            order_id: order.id,
            courier_id: order.courier_id,
            status: order.status.clone(),
        })
        .collect();

    Json(deliveries)
}
