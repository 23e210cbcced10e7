//! Client library for a food delivery service.
//!
//! Customers log in, browse restaurants, build a cart, place orders and rate
//! delivered ones. Couriers see their assigned orders and move each one from
//! pending to in progress to delivered. [`api`] talks to the REST backend,
//! [`flows`] composes those calls with the session store, and [`domain`]
//! holds the pure rules. [`mock_backend`] is an axum server speaking the same
//! protocol, seeded with demo data.

pub mod api;
pub mod app_error;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod flows;
pub mod mock_backend;
pub mod models;
pub mod session;
