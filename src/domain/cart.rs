use std::collections::BTreeMap;

use crate::{
    app_error::AppError,
    domain::summary,
    models::{CustomerId, LineItem, NewOrder, NewOrderLine, Product, ProductId, RestaurantId},
};

/// Requested quantity per product for one restaurant's menu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    restaurant_id: RestaurantId,
    quantities: BTreeMap<ProductId, u32>,
}

impl Cart {
    pub fn new(restaurant_id: RestaurantId) -> Self {
        Self {
            restaurant_id,
            quantities: BTreeMap::new(),
        }
    }

    /// A cart with a zero entry for every item on `menu`.
    pub fn for_menu(restaurant_id: RestaurantId, menu: &[Product]) -> Self {
        Self {
            restaurant_id,
            quantities: menu.iter().map(|product| (product.id, 0)).collect(),
        }
    }

    pub fn restaurant_id(&self) -> RestaurantId {
        self.restaurant_id
    }

    pub fn quantities(&self) -> &BTreeMap<ProductId, u32> {
        &self.quantities
    }

    pub fn quantity(&self, product_id: ProductId) -> u32 {
        self.quantities.get(&product_id).copied().unwrap_or(0)
    }

    pub fn increase(&mut self, product_id: ProductId) -> u32 {
        let quantity = self.quantities.entry(product_id).or_insert(0);
        *quantity = quantity.saturating_add(1);
        *quantity
    }

    /// Never goes below zero.
    pub fn decrease(&mut self, product_id: ProductId) -> u32 {
        let quantity = self.quantities.entry(product_id).or_insert(0);
        *quantity = quantity.saturating_sub(1);
        *quantity
    }

    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        self.quantities.insert(product_id, quantity);
    }

    /// True when nothing has a positive quantity.
    pub fn is_empty(&self) -> bool {
        self.quantities.values().all(|quantity| *quantity == 0)
    }

    pub fn total(&self, catalog: &[Product]) -> u64 {
        summary::order_total(&self.quantities, catalog)
    }

    pub fn summary(&self, catalog: &[Product]) -> Vec<LineItem> {
        summary::line_items(&self.quantities, catalog)
    }

    /// Request body for this cart. Fails on an empty cart or a product missing
    /// from `catalog`.
    pub fn to_new_order(
        &self,
        customer_id: CustomerId,
        catalog: &[Product],
    ) -> Result<NewOrder, AppError> {
        if self.is_empty() {
            return Err(AppError::InvalidInput(
                "Add at least one item before placing an order.".into(),
            ));
        }
        summary::try_order_total(&self.quantities, catalog)?;

        let products = self
            .quantities
            .iter()
            .filter(|(_, quantity)| **quantity > 0)
            .map(|(id, quantity)| NewOrderLine {
                id: *id,
                quantity: *quantity,
            })
            .collect();

        Ok(NewOrder {
            restaurant_id: self.restaurant_id,
            customer_id,
            products,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> Vec<Product> {
        vec![
            Product {
                id: 1,
                name: "Cheeseburger".into(),
                cost: 50,
                description: None,
            },
            Product {
                id: 2,
                name: "Scotch Eggs".into(),
                cost: 2025,
                description: None,
            },
        ]
    }

    #[test]
    fn menu_cart_starts_empty() {
        let cart = Cart::for_menu(3, &menu());
        assert!(cart.is_empty());
        assert_eq!(cart.quantity(1), 0);
        assert_eq!(cart.total(&menu()), 0);
    }

    #[test]
    fn decrease_stops_at_zero() {
        let mut cart = Cart::new(3);
        assert_eq!(cart.decrease(1), 0);
        cart.increase(1);
        cart.increase(1);
        assert_eq!(cart.decrease(1), 1);
        assert_eq!(cart.decrease(1), 0);
        assert_eq!(cart.decrease(1), 0);
    }

    #[test]
    fn total_and_summary_use_positive_quantities() {
        let mut cart = Cart::for_menu(3, &menu());
        cart.increase(1);
        cart.increase(1);
        cart.set_quantity(2, 1);

        assert_eq!(cart.total(&menu()), 2 * 50 + 2025);
        let summary = cart.summary(&menu());
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[1].product_name, "Scotch Eggs");
    }

    #[test]
    fn new_order_skips_zero_lines() {
        let mut cart = Cart::for_menu(3, &menu());
        cart.set_quantity(2, 2);

        let order = cart.to_new_order(9, &menu()).unwrap();
        assert_eq!(order.restaurant_id, 3);
        assert_eq!(order.customer_id, 9);
        assert_eq!(order.products, vec![NewOrderLine { id: 2, quantity: 2 }]);
    }

    #[test]
    fn new_order_requires_items() {
        let cart = Cart::for_menu(3, &menu());
        assert!(matches!(
            cart.to_new_order(9, &menu()),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn new_order_rejects_products_off_the_menu() {
        let mut cart = Cart::new(3);
        cart.increase(77);
        assert!(matches!(
            cart.to_new_order(9, &menu()),
            Err(AppError::UnknownProduct(77))
        ));
    }
}
