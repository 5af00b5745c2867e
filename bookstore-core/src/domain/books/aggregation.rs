use std::{any::type_name_of_val, fmt, sync::Arc};

use tracing::warn;

use crate::database::ports::books::{BookField, BookStore, FieldValue};
use crate::error::Result;

/// Distinct-value queries used to browse the catalog. Values come back in
/// whatever order the store produces them.
pub struct AggregationService<S: BookStore + ?Sized> {
    store: Arc<S>,
}

impl<S> fmt::Debug for AggregationService<S>
where
    S: BookStore + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store_type = type_name_of_val(self.store.as_ref());
        f.debug_struct("AggregationService")
            .field("store_type", &store_type)
            .finish()
    }
}

impl<S> AggregationService<S>
where
    S: BookStore + ?Sized,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn distinct_genres(&self) -> Result<Vec<String>> {
        self.distinct_text(BookField::Genre).await
    }

    pub async fn distinct_authors(&self) -> Result<Vec<String>> {
        self.distinct_text(BookField::Author).await
    }

    pub async fn distinct_years(&self) -> Result<Vec<i32>> {
        let values = self.store.distinct(BookField::ReleaseYear).await?;
        Ok(values
            .into_iter()
            .filter_map(|value| match value {
                FieldValue::Integer(year) => Some(year),
                FieldValue::Text(text) => {
                    warn!(value = %text, "skipping non-numeric release year");
                    None
                }
            })
            .collect())
    }

    async fn distinct_text(&self, field: BookField) -> Result<Vec<String>> {
        let values = self.store.distinct(field).await?;
        Ok(values
            .into_iter()
            .filter_map(|value| match value {
                FieldValue::Text(text) => Some(text),
                FieldValue::Integer(number) => {
                    warn!(field = %field, value = number, "skipping numeric group key");
                    None
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::InMemoryBookStore;
    use crate::database::ports::books::BookStore as _;
    use bookstore_model::Book;
    use serde_json::json;

    async fn seeded() -> AggregationService<InMemoryBookStore> {
        let store = Arc::new(InMemoryBookStore::new());
        let books = [
            ("Dune", "Frank Herbert", "Sci-Fi", 1965),
            ("Children of Dune", "Frank Herbert", "Sci-Fi", 1976),
            ("Emma", "Jane Austen", "Romance", 1815),
            ("Dracula", "Bram Stoker", "Horror", 1897),
        ];
        for (name, author, genre, year) in books {
            store
                .insert(&Book::new(name, author, genre, year))
                .await
                .unwrap();
        }
        AggregationService::new(store)
    }

    #[tokio::test]
    async fn genres_are_distinct() {
        let service = seeded().await;
        let mut genres = service.distinct_genres().await.unwrap();
        genres.sort();
        assert_eq!(genres, vec!["Horror", "Romance", "Sci-Fi"]);
    }

    #[tokio::test]
    async fn authors_are_distinct() {
        let service = seeded().await;
        let mut authors = service.distinct_authors().await.unwrap();
        authors.sort();
        assert_eq!(authors, vec!["Bram Stoker", "Frank Herbert", "Jane Austen"]);
    }

    #[tokio::test]
    async fn years_are_distinct_integers() {
        let service = seeded().await;
        let mut years = service.distinct_years().await.unwrap();
        years.sort_unstable();
        assert_eq!(years, vec![1815, 1897, 1965, 1976]);
    }

    #[tokio::test]
    async fn empty_catalog_yields_empty_lists() {
        let service = AggregationService::new(Arc::new(InMemoryBookStore::new()));
        assert!(service.distinct_genres().await.unwrap().is_empty());
        assert!(service.distinct_years().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn mistyped_keys_are_skipped() {
        let store = Arc::new(InMemoryBookStore::new());
        store.insert_raw(json!({ "book_name": "A", "genre": 12 })).await;
        store
            .insert_raw(json!({ "book_name": "B", "release_date": "1999" }))
            .await;
        store
            .insert(&Book::new("C", "Someone", "Poetry", 2001))
            .await
            .unwrap();
        let service = AggregationService::new(store);

        assert_eq!(service.distinct_genres().await.unwrap(), vec!["Poetry"]);
        assert_eq!(service.distinct_years().await.unwrap(), vec![2001]);
    }
}
