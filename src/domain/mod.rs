//! Pure order-lifecycle rules shared by the customer and courier flows.

pub mod account;
pub mod address;
pub mod cart;
pub mod rating;
pub mod status;
pub mod summary;

pub use account::{AccountType, Landing};
pub use cart::Cart;
pub use rating::Rating;
pub use status::{OrderStatus, next_status};
