use std::any::type_name_of_val;
use std::fmt;
use std::sync::Arc;

use crate::database::{
    client::StoreClient, memory::InMemoryBookStore, mongo::MongoBookStore,
    ports::books::BookStore,
};
use crate::domain::books::{AggregationService, BookRepository, ReviewService};

/// Bundles the catalog services over one shared store so request handlers
/// depend on a single value.
#[derive(Clone)]
pub struct AppUnitOfWork {
    pub store: Arc<dyn BookStore>,
    pub books: Arc<BookRepository<dyn BookStore>>,
    pub catalog: Arc<AggregationService<dyn BookStore>>,
    pub reviews: Arc<ReviewService<dyn BookStore>>,
}

impl fmt::Debug for AppUnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUnitOfWork")
            .field("store", &type_name_of_val(self.store.as_ref()))
            .finish_non_exhaustive()
    }
}

impl AppUnitOfWork {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self {
            books: Arc::new(BookRepository::new(Arc::clone(&store))),
            catalog: Arc::new(AggregationService::new(Arc::clone(&store))),
            reviews: Arc::new(ReviewService::new(Arc::clone(&store))),
            store,
        }
    }

    /// Services backed by the `Books` collection of a connected client.
    pub fn from_client(client: StoreClient) -> Self {
        Self::new(Arc::new(MongoBookStore::new(client)))
    }

    /// Services backed by a fresh process-local store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryBookStore::new()))
    }
}
