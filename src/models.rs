use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{AccountType, OrderStatus, summary};

pub type UserId = u64;
pub type CustomerId = u64;
pub type CourierId = u64;
pub type RestaurantId = u64;
pub type ProductId = u64;
pub type OrderId = u64;

// Session

/// Identity persisted under the `userToken` key after a successful login.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserToken {
    pub user_id: UserId,
    pub customer_id: Option<CustomerId>,
    pub courier_id: Option<CourierId>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    #[serde(default)]
    pub courier_id: Option<CourierId>,
}

// Accounts

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct AccountDetails {
    pub primary_email: String,
    #[serde(default)]
    pub account_email: String,
    #[serde(default)]
    pub account_phone: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct AccountUpdate {
    pub account_email: String,
    /// Digits only.
    pub account_phone: String,
    pub account_type: AccountType,
}

#[derive(Serialize, Deserialize, Debug, Clone, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AccountQuery {
    #[serde(rename = "type")]
    pub account_type: AccountType,
}

// Restaurants and products

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    /// 1 to 3, rendered as `$`, `$$`, `$$$`.
    pub price_range: u8,
    /// Average customer rating, absent until the restaurant has been rated.
    #[serde(default)]
    pub rating: Option<u8>,
}

impl Restaurant {
    pub fn price_label(&self) -> String {
        "$".repeat(usize::from(self.price_range.max(1)))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RestaurantFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RestaurantId>,
    /// Minimum average rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<u8>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit cost in cents.
    pub cost: u64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<RestaurantId>,
}

// Orders

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct LineItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub product_name: String,
    pub quantity: u32,
    /// Unit cost in cents.
    pub unit_cost: u64,
    /// Line total in cents as reported by the backend.
    #[serde(default)]
    pub total_cost: u64,
}

impl LineItem {
    pub fn new(product: &Product, quantity: u32) -> Self {
        let mut item = Self {
            product_id: product.id,
            product_name: product.name.clone(),
            quantity,
            unit_cost: product.cost,
            total_cost: 0,
        };
        item.total_cost = item.line_total();
        item
    }

    /// `quantity × unit_cost`, saturating.
    pub fn line_total(&self) -> u64 {
        self.unit_cost.saturating_mul(u64::from(self.quantity))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub restaurant_id: RestaurantId,
    #[serde(default)]
    pub restaurant_name: String,
    #[serde(default)]
    pub customer_address: String,
    #[serde(default)]
    pub courier_id: Option<CourierId>,
    #[serde(default)]
    pub courier_name: Option<String>,
    #[schema(value_type = String, example = "pending")]
    pub status: OrderStatus,
    #[serde(default)]
    pub products: Vec<LineItem>,
    /// Order total in cents.
    #[serde(default)]
    pub total_cost: u64,
    #[serde(default)]
    pub restaurant_rating: Option<u8>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Total recomputed from the line items.
    pub fn computed_total(&self) -> u64 {
        summary::line_items_total(&self.products)
    }

    pub fn total_is_consistent(&self) -> bool {
        self.computed_total() == self.total_cost
    }

    pub fn is_rated(&self) -> bool {
        self.restaurant_rating.is_some()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct NewOrderLine {
    pub id: ProductId,
    pub quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct NewOrder {
    pub restaurant_id: RestaurantId,
    pub customer_id: CustomerId,
    pub products: Vec<NewOrderLine>,
}

#[derive(Serialize, Deserialize, Debug, Clone, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderQuery {
    /// Customer or courier id, depending on `type`.
    pub id: u64,
    #[serde(rename = "type")]
    pub account_type: AccountType,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct StatusUpdate {
    #[schema(value_type = String, example = "in progress")]
    pub status: OrderStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
pub struct RatingRequest {
    pub restaurant_rating: u8,
}

// Deliveries

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Delivery {
    pub id: u64,
    pub order_id: OrderId,
    #[serde(default)]
    pub courier_id: Option<CourierId>,
    #[schema(value_type = String, example = "in progress")]
    pub status: OrderStatus,
}

/// Error body returned by the backend on non-success responses.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ApiErrorBody {
    pub error: String,
}
