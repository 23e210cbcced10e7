pub mod accounts;
pub mod auth;
pub mod deliveries;
pub mod orders;
pub mod restaurants;
