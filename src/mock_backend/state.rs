use std::{collections::BTreeMap, sync::Arc};

use tokio::sync::{Mutex, MutexGuard};

use crate::{
    domain::OrderStatus,
    models::{CourierId, CustomerId, Order, OrderId, Product, Restaurant, RestaurantId, UserId},
};

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user_id: UserId,
    pub email: String,
    pub password: String,
    pub customer_id: Option<CustomerId>,
    pub courier_id: Option<CourierId>,
}

/// A customer or courier profile.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone)]
pub struct RestaurantRecord {
    pub id: RestaurantId,
    pub name: String,
    pub price_range: u8,
    pub menu: Vec<Product>,
}

#[derive(Debug, Default)]
pub struct MockData {
    pub users: Vec<UserRecord>,
    pub customers: BTreeMap<CustomerId, AccountRecord>,
    pub couriers: BTreeMap<CourierId, AccountRecord>,
    pub restaurants: Vec<RestaurantRecord>,
    pub orders: BTreeMap<OrderId, Order>,
}

impl MockData {
    pub fn next_order_id(&self) -> OrderId {
        self.orders.keys().next_back().map_or(1, |id| id + 1)
    }

    pub fn restaurant(&self, id: RestaurantId) -> Option<&RestaurantRecord> {
        self.restaurants.iter().find(|restaurant| restaurant.id == id)
    }

    pub fn user(&self, user_id: UserId) -> Option<&UserRecord> {
        self.users.iter().find(|user| user.user_id == user_id)
    }

    /// Rounded mean of the ratings given to the restaurant's orders.
    pub fn average_rating(&self, restaurant_id: RestaurantId) -> Option<u8> {
        let ratings: Vec<u32> = self
            .orders
            .values()
            .filter(|order| order.restaurant_id == restaurant_id)
            .filter_map(|order| order.restaurant_rating.map(u32::from))
            .collect();
        if ratings.is_empty() {
            return None;
        }
        let count = ratings.len() as u32;
        let sum: u32 = ratings.iter().sum();
        u8::try_from((sum + count / 2) / count).ok()
    }

    pub fn restaurant_view(&self, record: &RestaurantRecord) -> Restaurant {
        Restaurant {
            id: record.id,
            name: record.name.clone(),
            price_range: record.price_range,
            rating: self.average_rating(record.id),
        }
    }

    /// Courier with the fewest undelivered orders; ties go to the lowest id.
    pub fn dispatch_courier(&self) -> Option<CourierId> {
        self.couriers
            .keys()
            .min_by_key(|courier_id| {
                let active = self
                    .orders
                    .values()
                    .filter(|order| order.courier_id == Some(**courier_id))
                    .filter(|order| order.status != OrderStatus::Delivered)
                    .count();
                (active, **courier_id)
            })
            .copied()
    }
}

/// Shared handle given to every route.
#[derive(Debug, Clone, Default)]
pub struct MockState {
    inner: Arc<Mutex<MockData>>,
}

impl MockState {
    pub fn new(data: MockData) -> Self {
        Self {
            inner: Arc::new(Mutex::new(data)),
        }
    }

    /// State pre-populated with the demo data set.
    pub fn seeded() -> Self {
        Self::new(MockData::seeded())
    }

    pub async fn lock(&self) -> MutexGuard<'_, MockData> {
        self.inner.lock().await
    }
}
