use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use tracing::{info, warn};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{
    app_error::AppError,
    domain::{AccountType, OrderStatus, Rating, rating::ensure_rateable, summary},
    mock_backend::MockState,
    models::{
        ApiErrorBody, LineItem, NewOrder, Order, OrderId, OrderQuery, ProductId, RatingRequest,
        StatusUpdate,
    },
};

pub fn routes_with_openapi() -> OpenApiRouter<MockState> {
    OpenApiRouter::new()
        .routes(routes!(list_orders, create_order))
        .routes(routes!(update_status))
        .routes(routes!(rate_order))
}

/// Orders of a customer or of a courier, newest first.
#[utoipa::path(
    get,
    path = "/orders",
    tags = ["Orders"],
    params(OrderQuery),
    responses(
        (status = 200, description = "Orders of the account", body = Vec<Order>)
    )
)]
async fn list_orders(
    Query(query): Query<OrderQuery>,
    State(state): State<MockState>,
) -> Json<Vec<Order>> {
    let data = state.lock().await;
    let mut orders: Vec<Order> = data
        .orders
        .values()
        .filter(|order| match query.account_type {
            AccountType::Customer => order.customer_id == query.id,
            AccountType::Courier => order.courier_id == Some(query.id),
        })
        .cloned()
        .collect();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

    Json(orders)
}

/// Place an order. Line totals and the order total are computed here.
#[utoipa::path(
    post,
    path = "/orders",
    tags = ["Orders"],
    request_body = NewOrder,
    responses(
        (status = 201, description = "Order created", body = Order),
        (status = 400, description = "Empty order or zero quantity", body = ApiErrorBody),
        (status = 404, description = "Unknown customer or restaurant", body = ApiErrorBody),
        (status = 422, description = "Product not on the restaurant's menu", body = ApiErrorBody)
    )
)]
async fn create_order(
    State(state): State<MockState>,
    Json(new_order): Json<NewOrder>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    if new_order.products.is_empty() {
        return Err(AppError::InvalidInput("Order has no products".into()));
    }

    let mut quantities: BTreeMap<ProductId, u32> = BTreeMap::new();
    for line in &new_order.products {
        if line.quantity == 0 {
            return Err(AppError::InvalidInput(format!(
                "Product {} has a zero quantity",
                line.id
            )));
        }
        let quantity = quantities.entry(line.id).or_default();
        *quantity = quantity.saturating_add(line.quantity);
    }

    let mut data = state.lock().await;
    let customer_address = data
        .customers
        .get(&new_order.customer_id)
        .map(|customer| customer.address.clone())
        .ok_or(AppError::NotFound)?;
    let restaurant = data
        .restaurant(new_order.restaurant_id)
        .ok_or(AppError::NotFound)?;

    let products = quantities
        .iter()
        .map(|(product_id, quantity)| {
            restaurant
                .menu
                .iter()
                .find(|product| product.id == *product_id)
                .map(|product| LineItem::new(product, *quantity))
                .ok_or(AppError::UnknownProduct(*product_id))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let restaurant_name = restaurant.name.clone();

    let courier_id = data.dispatch_courier();
    let courier_name = courier_id
        .and_then(|id| data.couriers.get(&id))
        .map(|courier| courier.name.clone());
    if courier_id.is_none() {
        warn!("No courier available for new order");
    }

    let order = Order {
        id: data.next_order_id(),
        customer_id: new_order.customer_id,
        restaurant_id: new_order.restaurant_id,
        restaurant_name,
        customer_address,
        courier_id,
        courier_name,
        status: OrderStatus::Pending,
        total_cost: summary::line_items_total(&products),
        products,
        restaurant_rating: None,
        created_at: Utc::now(),
    };
    data.orders.insert(order.id, order.clone());

    info!(
        "Created order #{} for customer #{} ({} cents)",
        order.id, order.customer_id, order.total_cost
    );
    Ok((StatusCode::CREATED, Json(order)))
}

/// Move an order to a new status, at most one step forward.
#[utoipa::path(
    post,
    path = "/order/{id}/status",
    tags = ["Orders"],
    params(
        ("id" = u64, Path, description = "Order ID")
    ),
    request_body = StatusUpdate,
    responses(
        (status = 200, description = "Status after the update", body = StatusUpdate),
        (status = 404, description = "No such order", body = ApiErrorBody),
        (status = 422, description = "Transition not allowed", body = ApiErrorBody)
    )
)]
async fn update_status(
    Path(id): Path<OrderId>,
    State(state): State<MockState>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<StatusUpdate>, AppError> {
    let mut data = state.lock().await;
    let order = data.orders.get_mut(&id).ok_or(AppError::NotFound)?;

    if !order.status.can_transition_to(&update.status) {
        return Err(AppError::InvalidTransition {
            from: order.status.clone(),
            to: update.status,
        });
    }

    info!("Order #{}: {} -> {}", id, order.status, update.status);
    order.status = update.status;
    Ok(Json(StatusUpdate {
        status: order.status.clone(),
    }))
}

/// Rate the restaurant of a delivered order. Each order is rated once.
#[utoipa::path(
    post,
    path = "/order/{id}/rating",
    tags = ["Orders"],
    params(
        ("id" = u64, Path, description = "Order ID")
    ),
    request_body = RatingRequest,
    responses(
        (status = 200, description = "Rating stored", body = Order),
        (status = 400, description = "Rating outside 1 to 5", body = ApiErrorBody),
        (status = 404, description = "No such order", body = ApiErrorBody),
        (status = 422, description = "Order not delivered or already rated", body = ApiErrorBody)
    )
)]
async fn rate_order(
    Path(id): Path<OrderId>,
    State(state): State<MockState>,
    Json(request): Json<RatingRequest>,
) -> Result<Json<Order>, AppError> {
    let rating = Rating::new(request.restaurant_rating)?;

    let mut data = state.lock().await;
    let order = data.orders.get_mut(&id).ok_or(AppError::NotFound)?;
    ensure_rateable(order)?;
    order.restaurant_rating = Some(rating.stars());

    info!("Order #{} rated {}", id, rating);
    Ok(Json(order.clone()))
}
