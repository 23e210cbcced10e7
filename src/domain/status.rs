use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Lifecycle stage of an order.
///
/// Known stages form a total order `Pending < InProgress < Delivered`.
/// Anything the backend reports that is not one of those is kept verbatim in
/// [`OrderStatus::Other`] so it can be displayed and sent back untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Delivered,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProgress => "in progress",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Other(raw) => raw,
        }
    }

    /// Position in the forward progression, `None` for unrecognised statuses.
    pub fn rank(&self) -> Option<u8> {
        match self {
            OrderStatus::Pending => Some(0),
            OrderStatus::InProgress => Some(1),
            OrderStatus::Delivered => Some(2),
            OrderStatus::Other(_) => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }

    /// The status that follows `self`. Terminal and unrecognised statuses map
    /// to themselves.
    pub fn next(&self) -> OrderStatus {
        match self {
            OrderStatus::Pending => OrderStatus::InProgress,
            OrderStatus::InProgress => OrderStatus::Delivered,
            OrderStatus::Delivered => OrderStatus::Delivered,
            OrderStatus::Other(raw) => OrderStatus::Other(raw.clone()),
        }
    }

    /// Whether an order currently in `self` may be moved to `target`.
    ///
    /// Staying put or moving exactly one step forward. Skipping a step and
    /// moving backward are refused. Unrecognised statuses never take part in a
    /// transition.
    pub fn can_transition_to(&self, target: &OrderStatus) -> bool {
        match (self.rank(), target.rank()) {
            (Some(_), Some(_)) => target == self || *target == self.next(),
            _ => false,
        }
    }
}

/// Fixed forward progression: pending -> in progress -> delivered -> delivered.
pub fn next_status(status: &OrderStatus) -> OrderStatus {
    status.next()
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        let normalized = raw.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "pending" => OrderStatus::Pending,
            "in progress" => OrderStatus::InProgress,
            "delivered" => OrderStatus::Delivered,
            _ => OrderStatus::Other(raw),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(OrderStatus::from(s.to_string()))
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(OrderStatus::Pending, OrderStatus::InProgress)]
    #[case(OrderStatus::InProgress, OrderStatus::Delivered)]
    #[case(OrderStatus::Delivered, OrderStatus::Delivered)]
    fn next_status_moves_one_step_forward(
        #[case] current: OrderStatus,
        #[case] expected: OrderStatus,
    ) {
        assert_eq!(next_status(&current), expected);
    }

    #[test]
    fn non_terminal_statuses_strictly_advance() {
        for status in [OrderStatus::Pending, OrderStatus::InProgress] {
            let next = next_status(&status);
            assert_eq!(next.rank(), status.rank().map(|rank| rank + 1));
        }
    }

    #[test]
    fn unrecognised_status_is_returned_unchanged() {
        let status = OrderStatus::from("cancelled".to_string());
        assert_eq!(status, OrderStatus::Other("cancelled".into()));
        assert_eq!(next_status(&status), status);
    }

    #[rstest]
    #[case("pending", OrderStatus::Pending)]
    #[case("PENDING", OrderStatus::Pending)]
    #[case("in progress", OrderStatus::InProgress)]
    #[case("in_progress", OrderStatus::InProgress)]
    #[case("In-Progress", OrderStatus::InProgress)]
    #[case("delivered", OrderStatus::Delivered)]
    fn parses_backend_spellings(#[case] raw: &str, #[case] expected: OrderStatus) {
        assert_eq!(raw.parse::<OrderStatus>().unwrap(), expected);
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&OrderStatus::InProgress).unwrap();
        assert_eq!(json, "\"in progress\"");

        let other: OrderStatus = serde_json::from_str("\"on hold\"").unwrap();
        assert_eq!(serde_json::to_string(&other).unwrap(), "\"on hold\"");
    }

    #[rstest]
    #[case(OrderStatus::Pending, OrderStatus::InProgress, true)]
    #[case(OrderStatus::InProgress, OrderStatus::Delivered, true)]
    #[case(OrderStatus::Pending, OrderStatus::Pending, true)]
    #[case(OrderStatus::Pending, OrderStatus::Delivered, false)]
    #[case(OrderStatus::Delivered, OrderStatus::Delivered, true)]
    #[case(OrderStatus::Delivered, OrderStatus::Pending, false)]
    #[case(OrderStatus::InProgress, OrderStatus::Pending, false)]
    #[case(OrderStatus::Other("x".into()), OrderStatus::Delivered, false)]
    fn transitions_move_one_step_at_most(
        #[case] from: OrderStatus,
        #[case] to: OrderStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.can_transition_to(&to), allowed);
    }
}
