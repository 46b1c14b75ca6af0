//! HTTP handlers

pub mod bookings;
pub mod contacts;
pub mod health;
pub mod routes;

pub use routes::create_routes;
