use tracing::info;

use crate::{
    api::{ApiClient, check_status, read_json, unreachable},
    app_error::AppError,
    domain::{AccountType, OrderStatus, Rating},
    models::{NewOrder, Order, OrderId, RatingRequest, StatusUpdate},
};

pub async fn create_order(client: &ApiClient, order: &NewOrder) -> Result<Order, AppError> {
    let response = client
        .http()
        .post(client.endpoint("/orders"))
        .json(order)
        .send()
        .await
        .map_err(unreachable)?;

    let created: Order = read_json(response).await?;
    info!(
        "Order #{} placed at restaurant #{}",
        created.id, created.restaurant_id
    );
    Ok(created)
}

/// Orders for a customer or a courier, keyed by the role-specific id.
pub async fn list_orders(
    client: &ApiClient,
    id: u64,
    account_type: AccountType,
) -> Result<Vec<Order>, AppError> {
    let response = client
        .http()
        .get(client.endpoint("/orders"))
        .query(&[("id", id.to_string()), ("type", account_type.to_string())])
        .send()
        .await
        .map_err(unreachable)?;

    read_json(response).await
}

/// Sets an order's status and returns the status the backend reports back.
pub async fn update_status(
    client: &ApiClient,
    order_id: OrderId,
    status: &OrderStatus,
) -> Result<OrderStatus, AppError> {
    let response = client
        .http()
        .post(client.endpoint(&format!("/order/{order_id}/status")))
        .json(&StatusUpdate {
            status: status.clone(),
        })
        .send()
        .await
        .map_err(unreachable)?;

    let updated: StatusUpdate = read_json(response).await?;
    info!("Order #{} is now {}", order_id, updated.status);
    Ok(updated.status)
}

pub async fn submit_rating(
    client: &ApiClient,
    order_id: OrderId,
    rating: Rating,
) -> Result<(), AppError> {
    let response = client
        .http()
        .post(client.endpoint(&format!("/order/{order_id}/rating")))
        .json(&RatingRequest {
            restaurant_rating: rating.stars(),
        })
        .send()
        .await
        .map_err(unreachable)?;

    check_status(response).await?;
    info!("Rating {} submitted for order #{}", rating, order_id);
    Ok(())
}
