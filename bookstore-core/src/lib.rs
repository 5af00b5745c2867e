//! # Bookstore Core
//!
//! Persistence ports and catalog logic for the bookstore inventory service.
//!
//! ## Architecture
//!
//! - [`database`]: the [`BookStore`](database::BookStore) port, the MongoDB
//!   adapter and a process-local adapter for tests
//! - [`domain`]: book lifecycle, distinct-value queries and reviews
//! - [`application`]: [`AppUnitOfWork`](application::AppUnitOfWork), the
//!   bundle of services handed to the HTTP layer
//!
//! ## Examples
//!
//! ```no_run
//! use bookstore_core::{application::AppUnitOfWork, database::StoreClient};
//! use bookstore_model::Book;
//! use std::time::Duration;
//!
//! async fn seed() -> bookstore_core::Result<()> {
//!     let client = StoreClient::connect(
//!         "mongodb://localhost:27017",
//!         "Bookstore",
//!         Duration::from_secs(10),
//!     )
//!     .await?;
//!     let uow = AppUnitOfWork::from_client(client);
//!     uow.books
//!         .create(Book::new("Dune", "Frank Herbert", "Sci-Fi", 1965))
//!         .await?;
//!     Ok(())
//! }
//! ```
#![allow(missing_docs)]

pub mod application;
pub mod database;
pub mod domain;
pub mod error;

pub use error::{BookstoreError, Result};
