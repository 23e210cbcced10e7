//! Demo data set. Every account uses the password [`DEMO_PASSWORD`].

use chrono::{Duration, TimeZone, Utc};

use crate::{
    domain::{OrderStatus, address::fallback_address, summary},
    mock_backend::state::{AccountRecord, MockData, RestaurantRecord, UserRecord},
    models::{CourierId, CustomerId, LineItem, Order, OrderId, Product, RestaurantId},
};

pub const DEMO_PASSWORD: &str = "password";

/// Holds both a customer and a courier account.
pub const DUAL_ROLE_EMAIL: &str = "erica.ger@gmail.com";
pub const CUSTOMER_EMAIL: &str = "customer@example.com";
pub const COURIER_EMAIL: &str = "courier@example.com";

const RESTAURANTS: [(&str, u8); 4] = [
    ("Golden Bar & Grill", 2),
    ("WJU Eats", 2),
    ("Sweet Dragon", 1),
    ("Golden Creamery", 1),
];

const MENU: [(&str, u64); 5] = [
    ("Cheeseburger", 50),
    ("Scotch Eggs", 2025),
    ("Cauliflower Penne", 900),
    ("French Toast", 1974),
    ("Ricotta Stuffed Ravioli", 825),
];

fn user(
    user_id: u64,
    email: &str,
    customer_id: Option<CustomerId>,
    courier_id: Option<CourierId>,
) -> UserRecord {
    UserRecord {
        user_id,
        email: email.to_string(),
        password: DEMO_PASSWORD.to_string(),
        customer_id,
        courier_id,
    }
}

fn account(user_id: u64, name: &str, email: &str, phone: &str, seed: u64) -> AccountRecord {
    AccountRecord {
        user_id,
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        address: fallback_address(seed).display(),
    }
}

fn menu_for(restaurant_id: RestaurantId) -> Vec<Product> {
    let first_id = (restaurant_id - 1) * MENU.len() as u64 + 1;
    MENU.iter()
        .zip(first_id..)
        .map(|((name, cost), id)| Product {
            id,
            name: (*name).to_string(),
            cost: *cost,
            description: Some(format!("{name} from the house menu.")),
        })
        .collect()
}

struct SeedOrder {
    id: OrderId,
    customer_id: CustomerId,
    restaurant_id: RestaurantId,
    courier_id: CourierId,
    status: OrderStatus,
    rating: Option<u8>,
    /// (menu position, quantity)
    lines: &'static [(usize, u32)],
}

const ORDERS: [SeedOrder; 6] = [
    SeedOrder {
        id: 1,
        customer_id: 1,
        restaurant_id: 1,
        courier_id: 1,
        status: OrderStatus::Delivered,
        rating: Some(4),
        lines: &[(0, 2), (2, 1)],
    },
    SeedOrder {
        id: 2,
        customer_id: 1,
        restaurant_id: 2,
        courier_id: 1,
        status: OrderStatus::Delivered,
        rating: Some(5),
        lines: &[(1, 1)],
    },
    SeedOrder {
        id: 3,
        customer_id: 1,
        restaurant_id: 3,
        courier_id: 1,
        status: OrderStatus::InProgress,
        rating: None,
        lines: &[(3, 1), (4, 2)],
    },
    SeedOrder {
        id: 4,
        customer_id: 2,
        restaurant_id: 3,
        courier_id: 2,
        status: OrderStatus::Delivered,
        rating: None,
        lines: &[(0, 3)],
    },
    SeedOrder {
        id: 5,
        customer_id: 2,
        restaurant_id: 1,
        courier_id: 2,
        status: OrderStatus::Pending,
        rating: None,
        lines: &[(4, 1)],
    },
    SeedOrder {
        id: 6,
        customer_id: 2,
        restaurant_id: 4,
        courier_id: 2,
        status: OrderStatus::Delivered,
        rating: Some(4),
        lines: &[(2, 2)],
    },
];

impl MockData {
    pub fn seeded() -> Self {
        let mut data = MockData {
            users: vec![
                user(1, DUAL_ROLE_EMAIL, Some(1), Some(1)),
                user(2, CUSTOMER_EMAIL, Some(2), None),
                user(3, COURIER_EMAIL, None, Some(2)),
            ],
            ..MockData::default()
        };

        data.customers.insert(
            1,
            account(1, "Erica Ger", "erica.customer@gmail.com", "5145550101", 3),
        );
        data.customers.insert(2, account(2, "Sam Diner", CUSTOMER_EMAIL, "5145550102", 8));
        data.couriers.insert(
            1,
            account(1, "Erica Ger", "erica.courier@gmail.com", "5145550201", 0),
        );
        data.couriers.insert(2, account(3, "Kim Rider", COURIER_EMAIL, "5145550202", 4));

        data.restaurants = RESTAURANTS
            .iter()
            .zip(1u64..)
            .map(|((name, price_range), id)| RestaurantRecord {
                id,
                name: (*name).to_string(),
                price_range: *price_range,
                menu: menu_for(id),
            })
            .collect();

        let start = Utc
            .with_ymd_and_hms(2024, 9, 1, 12, 0, 0)
            .single()
            .unwrap_or_default();
        for seed in &ORDERS {
            let order = data.build_seed_order(seed, start + Duration::hours(seed.id as i64));
            data.orders.insert(order.id, order);
        }
        data
    }

    fn build_seed_order(&self, seed: &SeedOrder, created_at: chrono::DateTime<Utc>) -> Order {
        let menu = self
            .restaurant(seed.restaurant_id)
            .map(|restaurant| restaurant.menu.as_slice())
            .unwrap_or_default();
        let products: Vec<LineItem> = seed
            .lines
            .iter()
            .filter_map(|(position, quantity)| {
                menu.get(*position)
                    .map(|product| LineItem::new(product, *quantity))
            })
            .collect();

        Order {
            id: seed.id,
            customer_id: seed.customer_id,
            restaurant_id: seed.restaurant_id,
            restaurant_name: self
                .restaurant(seed.restaurant_id)
                .map(|restaurant| restaurant.name.clone())
                .unwrap_or_default(),
            customer_address: self
                .customers
                .get(&seed.customer_id)
                .map(|customer| customer.address.clone())
                .unwrap_or_default(),
            courier_id: Some(seed.courier_id),
            courier_name: self
                .couriers
                .get(&seed.courier_id)
                .map(|courier| courier.name.clone()),
            status: seed.status.clone(),
            total_cost: summary::line_items_total(&products),
            products,
            restaurant_rating: seed.rating,
            created_at,
        }
    }
}
