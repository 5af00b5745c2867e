pub mod client;
pub mod memory;
pub mod mongo;
pub mod ports;

pub use client::{BOOKS_COLLECTION, DEFAULT_DATABASE, StoreClient};
pub use memory::InMemoryBookStore;
pub use mongo::MongoBookStore;
pub use ports::books::{
    BookField, BookFilter, BookStore, FieldAssignment, FieldValue,
};

use std::{future::Future, time::Duration};

use crate::error::{BookstoreError, Result};

/// Default upper bound for a single store round trip.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Run one driver call under a deadline, folding both driver failures and
/// timeouts into [`BookstoreError::Query`].
pub(crate) async fn with_deadline<T, F>(
    operation: &'static str,
    deadline: Duration,
    fut: F,
) -> Result<T>
where
    F: Future<Output = mongodb::error::Result<T>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result.map_err(|err| {
            BookstoreError::Query(format!("{operation}: {err}"))
        }),
        Err(_) => Err(BookstoreError::Query(format!(
            "{operation} timed out after {}ms",
            deadline.as_millis()
        ))),
    }
}
