use tracing::warn;

use crate::{
    api::{self, ApiClient},
    app_error::AppError,
    domain::{AccountType, Cart},
    flows::login::session_for,
    models::{Order, Product, Restaurant, RestaurantFilter, RestaurantId},
    session::SessionStore,
};

/// A restaurant together with its products.
#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    pub restaurant_id: RestaurantId,
    pub restaurant: Option<Restaurant>,
    pub products: Vec<Product>,
}

impl Menu {
    /// Empty cart with an entry per menu item.
    pub fn cart(&self) -> Cart {
        Cart::for_menu(self.restaurant_id, &self.products)
    }
}

pub async fn browse_restaurants(
    client: &ApiClient,
    filter: &RestaurantFilter,
) -> Result<Vec<Restaurant>, AppError> {
    let mut restaurants = api::restaurants::list_restaurants(client, filter).await?;
    restaurants.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(restaurants)
}

pub async fn load_menu(client: &ApiClient, restaurant_id: RestaurantId) -> Result<Menu, AppError> {
    let (restaurant, products) = futures::try_join!(
        api::restaurants::get_restaurant(client, restaurant_id),
        api::products::get_products(client, restaurant_id),
    )?;

    Ok(Menu {
        restaurant_id,
        restaurant,
        products,
    })
}

/// Submits `cart` as a new order for the logged-in customer.
pub async fn place_order(
    client: &ApiClient,
    store: &dyn SessionStore,
    cart: &Cart,
    menu: &[Product],
) -> Result<Order, AppError> {
    let session = session_for(store, AccountType::Customer)?;
    let request = cart.to_new_order(session.role_id, menu)?;
    let expected_total = cart.total(menu);

    let order = api::orders::create_order(client, &request).await?;
    if order.total_cost != expected_total {
        warn!(
            "Order #{} total {} differs from cart total {}",
            order.id, order.total_cost, expected_total
        );
    }
    Ok(order)
}
