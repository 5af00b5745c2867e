//! HTTP surface of the bookstore inventory service.
//!
//! The binary in `main.rs` loads configuration, connects the store and
//! serves [`app::create_app`]. Integration tests build the same router over
//! the in-memory store.

pub mod app;
pub mod errors;
pub mod handlers;
pub mod infra;
pub mod routes;

pub use app::create_app;
pub use infra::app_state::AppState;
