use std::time::Duration;

use tracing::{info, warn};

use crate::{
    api::{self, ApiClient},
    app_error::AppError,
    domain::{Rating, rating::ensure_rateable},
    flows::history::find_order,
    models::{Order, OrderId, RestaurantId},
    session::SessionStore,
};

/// Wait between submitting a rating and re-reading the restaurant average.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingOutcome {
    pub order_id: OrderId,
    pub rating: Rating,
    pub average_before: Option<u8>,
    pub average_after: Option<u8>,
}

impl RatingOutcome {
    pub fn average_changed(&self) -> bool {
        self.average_before != self.average_after
    }

    pub fn message(&self) -> String {
        if self.average_changed() {
            format!(
                "Your rating has been submitted. The average rating changed from {} to {}.",
                describe(self.average_before),
                describe(self.average_after)
            )
        } else {
            "Your rating was submitted, but the average rating did not change.".to_string()
        }
    }
}

fn describe(average: Option<u8>) -> String {
    average.map_or_else(|| "none".to_string(), |stars| stars.to_string())
}

/// Best effort: a failed lookup is logged and reported as no average.
async fn average_rating(client: &ApiClient, restaurant_id: RestaurantId) -> Option<u8> {
    match api::restaurants::get_restaurant(client, restaurant_id).await {
        Ok(restaurant) => restaurant.and_then(|restaurant| restaurant.rating),
        Err(err) => {
            warn!("Failed to fetch rating of restaurant #{}: {}", restaurant_id, err);
            None
        }
    }
}

/// Rates a delivered, unrated order and reports how the restaurant average moved.
///
/// `settle` is how long to wait after submitting before reading the new average.
pub async fn rate_order(
    client: &ApiClient,
    order: &Order,
    rating: Rating,
    settle: Duration,
) -> Result<RatingOutcome, AppError> {
    ensure_rateable(order)?;

    let average_before = average_rating(client, order.restaurant_id).await;
    api::orders::submit_rating(client, order.id, rating).await?;

    if !settle.is_zero() {
        tokio::time::sleep(settle).await;
    }
    let average_after = average_rating(client, order.restaurant_id).await;

    let outcome = RatingOutcome {
        order_id: order.id,
        rating,
        average_before,
        average_after,
    };
    info!("{}", outcome.message());
    Ok(outcome)
}

/// Rates one of the logged-in customer's orders. Only a customer session may
/// rate.
pub async fn rate_customer_order(
    client: &ApiClient,
    store: &dyn SessionStore,
    order_id: OrderId,
    rating: Rating,
    settle: Duration,
) -> Result<RatingOutcome, AppError> {
    let order = find_order(client, store, order_id).await?;
    rate_order(client, &order, rating, settle).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(before: Option<u8>, after: Option<u8>) -> RatingOutcome {
        RatingOutcome {
            order_id: 1,
            rating: Rating::new(5).unwrap(),
            average_before: before,
            average_after: after,
        }
    }

    #[test]
    fn reports_change() {
        let outcome = outcome(Some(3), Some(4));
        assert!(outcome.average_changed());
        assert_eq!(
            outcome.message(),
            "Your rating has been submitted. The average rating changed from 3 to 4."
        );
    }

    #[test]
    fn reports_no_change() {
        assert!(!outcome(Some(4), Some(4)).average_changed());
        assert!(outcome(Some(4), Some(4)).message().contains("did not change"));
    }

    #[test]
    fn first_rating_changes_from_none() {
        assert!(outcome(None, Some(5)).message().contains("from none to 5"));
    }
}
