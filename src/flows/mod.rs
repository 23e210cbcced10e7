//! User-facing operations composed from the API wrappers, the session store
//! and the domain rules. Each flow either completes or returns an
//! [`AppError`](crate::app_error::AppError) and leaves local state as it was.

pub mod account;
pub mod deliveries;
pub mod history;
pub mod login;
pub mod ordering;
pub mod rating;

pub use login::{ActiveSession, active_session};
