use crate::{
    api::{ApiClient, read_json, unreachable},
    app_error::AppError,
    models::{Product, ProductFilter, RestaurantId},
};

/// Menu of one restaurant.
pub async fn get_products(
    client: &ApiClient,
    restaurant_id: RestaurantId,
) -> Result<Vec<Product>, AppError> {
    let filter = ProductFilter {
        restaurant: Some(restaurant_id),
    };
    let response = client
        .http()
        .get(client.endpoint("/products"))
        .query(&filter)
        .send()
        .await
        .map_err(unreachable)?;

    read_json(response).await
}
