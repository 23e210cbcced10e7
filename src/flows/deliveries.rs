use tracing::{info, warn};

use crate::{
    api::{self, ApiClient},
    app_error::AppError,
    domain::{
        AccountType, OrderStatus,
        address::{Address, resolve_address},
        next_status,
    },
    flows::login::session_for,
    models::{Delivery, Order, OrderId},
    session::SessionStore,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Advanced { from: OrderStatus, to: OrderStatus },
    /// Delivered is terminal; nothing was sent.
    AlreadyDelivered,
    /// The status is not one the transition rule knows; nothing was sent.
    Unrecognised(OrderStatus),
}

/// Orders assigned to the logged-in courier.
pub async fn courier_orders(
    client: &ApiClient,
    store: &dyn SessionStore,
) -> Result<Vec<Order>, AppError> {
    let session = session_for(store, AccountType::Courier)?;
    let mut orders =
        api::orders::list_orders(client, session.role_id, AccountType::Courier).await?;
    orders.sort_by_key(|order| (order.status.rank().unwrap_or(u8::MAX), order.id));
    Ok(orders)
}

pub async fn all_deliveries(client: &ApiClient) -> Result<Vec<Delivery>, AppError> {
    api::deliveries::list_deliveries(client).await
}

/// Moves `order` one step forward and returns what happened.
pub async fn advance_order(client: &ApiClient, order: &Order) -> Result<AdvanceOutcome, AppError> {
    let next = next_status(&order.status);
    if next == order.status {
        return Ok(if order.status.is_terminal() {
            AdvanceOutcome::AlreadyDelivered
        } else {
            warn!("Order #{} has unrecognised status {}", order.id, order.status);
            AdvanceOutcome::Unrecognised(order.status.clone())
        });
    }

    let confirmed = api::orders::update_status(client, order.id, &next).await?;
    if confirmed != next {
        warn!(
            "Order #{} moved to {} but backend reports {}",
            order.id, next, confirmed
        );
    }
    info!("Order #{}: {} -> {}", order.id, order.status, confirmed);
    Ok(AdvanceOutcome::Advanced {
        from: order.status.clone(),
        to: confirmed,
    })
}

/// Advances one of the logged-in courier's orders.
pub async fn advance_delivery(
    client: &ApiClient,
    store: &dyn SessionStore,
    order_id: OrderId,
) -> Result<AdvanceOutcome, AppError> {
    let order = courier_orders(client, store)
        .await?
        .into_iter()
        .find(|order| order.id == order_id)
        .ok_or(AppError::NotFound)?;
    advance_order(client, &order).await
}

/// Street line of the customer's address, or of a stand-in picked by order id
/// when the address on the order is incomplete.
pub fn drop_off_address(order: &Order) -> String {
    let address = Address::parse(&order.customer_address);
    resolve_address(Some(&address), order.id).street_address
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::address::fallback_address;

    fn order(id: OrderId, address: &str) -> Order {
        Order {
            id,
            customer_id: 1,
            restaurant_id: 1,
            restaurant_name: String::new(),
            customer_address: address.into(),
            courier_id: Some(1),
            courier_name: None,
            status: OrderStatus::Pending,
            products: Vec::new(),
            total_cost: 0,
            restaurant_rating: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn drop_off_uses_first_segment() {
        assert_eq!(
            drop_off_address(&order(1, "111 8th Ave, New York, NY 10011")),
            "111 8th Ave"
        );
    }

    #[rstest]
    #[case("  ")]
    #[case("12 Main St")]
    fn incomplete_address_falls_back_to_known_one(#[case] address: &str) {
        let expected = fallback_address(3).street_address;
        assert_eq!(drop_off_address(&order(3, address)), expected);
    }
}
