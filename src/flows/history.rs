use tracing::warn;

use crate::{
    api::{self, ApiClient},
    app_error::AppError,
    domain::AccountType,
    flows::login::session_for,
    models::{Order, OrderId},
    session::SessionStore,
};

fn flag_inconsistent_totals(orders: &[Order]) {
    for order in orders.iter().filter(|order| !order.total_is_consistent()) {
        warn!(
            "Order #{} reports total {} but its items add up to {}",
            order.id,
            order.total_cost,
            order.computed_total()
        );
    }
}

/// The customer's orders, newest first.
pub async fn order_history(
    client: &ApiClient,
    store: &dyn SessionStore,
) -> Result<Vec<Order>, AppError> {
    let session = session_for(store, AccountType::Customer)?;
    let mut orders =
        api::orders::list_orders(client, session.role_id, AccountType::Customer).await?;
    flag_inconsistent_totals(&orders);
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(orders)
}

/// One of the logged-in customer's orders.
pub async fn find_order(
    client: &ApiClient,
    store: &dyn SessionStore,
    order_id: OrderId,
) -> Result<Order, AppError> {
    let session = session_for(store, AccountType::Customer)?;
    api::orders::list_orders(client, session.role_id, AccountType::Customer)
        .await?
        .into_iter()
        .find(|order| order.id == order_id)
        .ok_or(AppError::NotFound)
}
