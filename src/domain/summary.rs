//! Order totals and summary lines.
//!
//! All amounts are integer cents. Sums saturate at `u64::MAX` rather than
//! wrapping.

use std::collections::{BTreeMap, HashMap};

use tracing::warn;

use crate::{
    app_error::AppError,
    models::{LineItem, Product, ProductId},
};

fn index_catalog(catalog: &[Product]) -> HashMap<ProductId, &Product> {
    catalog.iter().map(|product| (product.id, product)).collect()
}

/// Total cost of the requested quantities against `catalog`.
///
/// Entries with a zero quantity are ignored. Entries naming a product the
/// catalog does not contain contribute nothing; use [`try_order_total`] to
/// reject them instead.
pub fn order_total(quantities: &BTreeMap<ProductId, u32>, catalog: &[Product]) -> u64 {
    let catalog = index_catalog(catalog);
    quantities
        .iter()
        .filter(|(_, quantity)| **quantity > 0)
        .map(|(product_id, quantity)| match catalog.get(product_id) {
            Some(product) => product.cost.saturating_mul(u64::from(*quantity)),
            None => {
                warn!(product_id, "Skipping unknown product in order total");
                0
            }
        })
        .fold(0u64, u64::saturating_add)
}

/// Like [`order_total`], but an unknown product with a positive quantity is an error.
pub fn try_order_total(
    quantities: &BTreeMap<ProductId, u32>,
    catalog: &[Product],
) -> Result<u64, AppError> {
    let catalog = index_catalog(catalog);
    quantities
        .iter()
        .filter(|(_, quantity)| **quantity > 0)
        .try_fold(0u64, |total, (product_id, quantity)| {
            let product = catalog
                .get(product_id)
                .ok_or(AppError::UnknownProduct(*product_id))?;
            Ok(total.saturating_add(product.cost.saturating_mul(u64::from(*quantity))))
        })
}

/// Summary lines for every catalog product with a positive quantity, in catalog order.
pub fn line_items(quantities: &BTreeMap<ProductId, u32>, catalog: &[Product]) -> Vec<LineItem> {
    catalog
        .iter()
        .filter_map(|product| match quantities.get(&product.id) {
            Some(&quantity) if quantity > 0 => Some(LineItem::new(product, quantity)),
            _ => None,
        })
        .collect()
}

/// Sum of `quantity × unit_cost` over items with a positive quantity.
pub fn line_items_total(items: &[LineItem]) -> u64 {
    items
        .iter()
        .filter(|item| item.quantity > 0)
        .map(LineItem::line_total)
        .fold(0u64, u64::saturating_add)
}

/// `1250` -> `"$ 12.50"`.
pub fn format_cents(cents: u64) -> String {
    format!("$ {}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    fn product(id: ProductId, cost: u64) -> Product {
        Product {
            id,
            name: format!("product {id}"),
            cost,
            description: None,
        }
    }

    fn item(product_id: ProductId, quantity: u32, unit_cost: u64) -> LineItem {
        LineItem {
            product_id,
            product_name: String::new(),
            quantity,
            unit_cost,
            total_cost: 0,
        }
    }

    #[fixture]
    fn catalog() -> Vec<Product> {
        vec![product(1, 500), product(2, 999), product(3, 250)]
    }

    #[rstest]
    fn zero_quantities_are_excluded(catalog: Vec<Product>) {
        let quantities = BTreeMap::from([(1, 2), (2, 0), (3, 1)]);
        assert_eq!(order_total(&quantities, &catalog), 1250);
        assert_eq!(try_order_total(&quantities, &catalog).unwrap(), 1250);
    }

    #[rstest]
    fn unknown_product_contributes_nothing(catalog: Vec<Product>) {
        let quantities = BTreeMap::from([(1, 1), (42, 3)]);
        assert_eq!(order_total(&quantities, &catalog), 500);
    }

    #[rstest]
    fn strict_total_rejects_unknown_product(catalog: Vec<Product>) {
        let quantities = BTreeMap::from([(1, 1), (42, 3)]);
        assert!(matches!(
            try_order_total(&quantities, &catalog),
            Err(AppError::UnknownProduct(42))
        ));
    }

    #[rstest]
    fn strict_total_ignores_unknown_product_with_zero_quantity(catalog: Vec<Product>) {
        let quantities = BTreeMap::from([(3, 4), (42, 0)]);
        assert_eq!(try_order_total(&quantities, &catalog).unwrap(), 1000);
    }

    #[rstest]
    fn summary_lines_follow_catalog_order(catalog: Vec<Product>) {
        let quantities = BTreeMap::from([(3, 1), (1, 2), (2, 0)]);
        let lines = line_items(&quantities, &catalog);
        let ids: Vec<_> = lines.iter().map(|line| line.product_id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(lines[0].total_cost, 1000);
    }

    #[test]
    fn line_items_total_matches_invariant() {
        let items = [item(1, 2, 500), item(2, 0, 999), item(3, 1, 250)];
        assert_eq!(line_items_total(&items), 1250);
    }

    #[test]
    fn totals_saturate() {
        let items = [item(1, u32::MAX, u64::MAX), item(2, 1, 1)];
        assert_eq!(line_items_total(&items), u64::MAX);
    }

    #[rstest]
    #[case(0, "$ 0.00")]
    #[case(5, "$ 0.05")]
    #[case(1250, "$ 12.50")]
    #[case(202_575, "$ 2025.75")]
    fn formats_cents(#[case] cents: u64, #[case] expected: &str) {
        assert_eq!(format_cents(cents), expected);
    }
}
