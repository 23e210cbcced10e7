use crate::{
    api::{ApiClient, read_json, unreachable},
    app_error::AppError,
    models::{Restaurant, RestaurantFilter, RestaurantId},
};

pub async fn list_restaurants(
    client: &ApiClient,
    filter: &RestaurantFilter,
) -> Result<Vec<Restaurant>, AppError> {
    let response = client
        .http()
        .get(client.endpoint("/restaurants"))
        .query(filter)
        .send()
        .await
        .map_err(unreachable)?;

    read_json(response).await
}

/// Looks a single restaurant up through the listing endpoint's `id` filter.
pub async fn get_restaurant(
    client: &ApiClient,
    id: RestaurantId,
) -> Result<Option<Restaurant>, AppError> {
    let filter = RestaurantFilter {
        id: Some(id),
        ..RestaurantFilter::default()
    };
    let restaurants = list_restaurants(client, &filter).await?;
    Ok(restaurants.into_iter().find(|restaurant| restaurant.id == id))
}
