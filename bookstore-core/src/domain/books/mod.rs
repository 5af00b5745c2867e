//! Catalog services: book lifecycle, grouping queries and reviews.

pub mod aggregation;
pub mod repository;
pub mod reviews;

pub use aggregation::AggregationService;
pub use repository::BookRepository;
pub use reviews::ReviewService;

use bookstore_model::{Book, BookId};

use crate::database::ports::books::{BookFilter, BookStore};
use crate::error::{BookstoreError, Result};

pub(crate) async fn load_book<S>(store: &S, id: BookId) -> Result<Book>
where
    S: BookStore + ?Sized,
{
    store
        .find_one(&BookFilter::Id(id))
        .await?
        .ok_or_else(|| BookstoreError::NotFound(id.to_hex()))
}
