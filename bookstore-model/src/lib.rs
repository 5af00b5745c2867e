//! Core data model definitions shared across bookstore crates.
#![allow(missing_docs)]

pub mod book;
pub mod error;
pub mod ids;
pub mod numbers;
pub mod review;

pub use book::{Book, BookPatch};
pub use error::{ModelError, Result as ModelResult};
pub use ids::BookId;
pub use review::{AverageRating, Review, MAX_RATING, MIN_RATING};
