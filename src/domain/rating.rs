use std::fmt;

use crate::{app_error::AppError, models::Order};

/// A restaurant rating between 1 and 5 stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(stars: u8) -> Result<Self, AppError> {
        if (Self::MIN..=Self::MAX).contains(&stars) {
            Ok(Self(stars))
        } else {
            Err(AppError::InvalidInput(format!(
                "rating must be between {} and {}, got {stars}",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn stars(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

/// An order takes exactly one rating, and only once it has been delivered.
pub fn ensure_rateable(order: &Order) -> Result<(), AppError> {
    if order.status.is_terminal() && !order.is_rated() {
        Ok(())
    } else {
        Err(AppError::RatingNotAllowed(order.id))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::OrderStatus;

    fn order(status: OrderStatus, rating: Option<u8>) -> Order {
        Order {
            id: 5,
            customer_id: 1,
            restaurant_id: 2,
            restaurant_name: String::new(),
            customer_address: String::new(),
            courier_id: None,
            courier_name: None,
            status,
            products: Vec::new(),
            total_cost: 0,
            restaurant_rating: rating,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(5, true)]
    #[case(6, false)]
    fn rating_is_bounded(#[case] stars: u8, #[case] valid: bool) {
        assert_eq!(Rating::new(stars).is_ok(), valid);
    }

    #[rstest]
    #[case(OrderStatus::Delivered, None, true)]
    #[case(OrderStatus::Delivered, Some(4), false)]
    #[case(OrderStatus::InProgress, None, false)]
    #[case(OrderStatus::Pending, None, false)]
    fn only_unrated_delivered_orders_are_rateable(
        #[case] status: OrderStatus,
        #[case] existing: Option<u8>,
        #[case] rateable: bool,
    ) {
        assert_eq!(ensure_rateable(&order(status, existing)).is_ok(), rateable);
    }
}
