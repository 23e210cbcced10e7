use axum::{
    Json,
    extract::{Query, State},
};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{
    mock_backend::MockState,
    models::{Product, ProductFilter, Restaurant, RestaurantFilter},
};

pub fn routes_with_openapi() -> OpenApiRouter<MockState> {
    OpenApiRouter::new()
        .routes(routes!(list_restaurants))
        .routes(routes!(list_products))
}

/// List restaurants, optionally filtered by id, minimum rating and price range.
#[utoipa::path(
    get,
    path = "/restaurants",
    tags = ["Restaurants"],
    params(RestaurantFilter),
    responses(
        (status = 200, description = "Matching restaurants", body = Vec<Restaurant>)
    )
)]
async fn list_restaurants(
    Query(filter): Query<RestaurantFilter>,
    State(state): State<MockState>,
) -> Json<Vec<Restaurant>> {
    let data = state.lock().await;
    let restaurants = data
        .restaurants
        .iter()
        .filter(|record| filter.id.is_none_or(|id| record.id == id))
        .filter(|record| {
            filter
                .price_range
                .is_none_or(|price_range| record.price_range == price_range)
        })
        .map(|record| data.restaurant_view(record))
        .filter(|restaurant| {
            filter
                .rating
                .is_none_or(|minimum| restaurant.rating.is_some_and(|rating| rating >= minimum))
        })
        .collect();

    Json(restaurants)
}

/// List the products of one restaurant, or of all restaurants.
#[utoipa::path(
    get,
    path = "/products",
    tags = ["Restaurants"],
    params(ProductFilter),
    responses(
        (status = 200, description = "Menu products", body = Vec<Product>)
    )
)]
async fn list_products(
    Query(filter): Query<ProductFilter>,
    State(state): State<MockState>,
) -> Json<Vec<Product>> {
    let data = state.lock().await;
    let products = data
        .restaurants
        .iter()
        .filter(|record| filter.restaurant.is_none_or(|id| record.id == id))
        .flat_map(|record| record.menu.iter().cloned())
        .collect();

    Json(products)
}
