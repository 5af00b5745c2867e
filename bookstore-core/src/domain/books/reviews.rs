use std::{any::type_name_of_val, fmt, sync::Arc};

use bookstore_model::{AverageRating, BookId, Review};
use tracing::info;

use super::load_book;
use crate::database::ports::books::BookStore;
use crate::error::{BookstoreError, Result};

/// Appends reviews to books and summarizes their ratings.
pub struct ReviewService<S: BookStore + ?Sized> {
    store: Arc<S>,
}

impl<S> fmt::Debug for ReviewService<S>
where
    S: BookStore + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store_type = type_name_of_val(self.store.as_ref());
        f.debug_struct("ReviewService")
            .field("store_type", &store_type)
            .finish()
    }
}

impl<S> ReviewService<S>
where
    S: BookStore + ?Sized,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Append `review` to the book's review list. Ratings outside 1..=5 are
    /// rejected before the store is touched.
    pub async fn add_review(&self, raw_id: &str, review: Review) -> Result<()> {
        let id = BookId::parse(raw_id)?;
        review.validate()?;

        let matched = self.store.push_review(id, &review).await?;
        if matched == 0 {
            return Err(BookstoreError::NotFound(id.to_hex()));
        }
        info!(book_id = %id, rating = review.rating, "review added");
        Ok(())
    }

    /// Mean rating of a book's reviews, `0.0` when it has none.
    pub async fn average_rating(&self, raw_id: &str) -> Result<AverageRating> {
        let id = BookId::parse(raw_id)?;
        let book = load_book(self.store.as_ref(), id).await?;
        Ok(AverageRating::from_reviews(&book.reviews))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::InMemoryBookStore;
    use crate::database::ports::books::BookFilter;
    use bookstore_model::Book;

    async fn with_book() -> (Arc<InMemoryBookStore>, ReviewService<InMemoryBookStore>, String)
    {
        let store = Arc::new(InMemoryBookStore::new());
        let id = store
            .insert(&Book::new("Dune", "Frank Herbert", "Sci-Fi", 1965))
            .await
            .unwrap();
        (store.clone(), ReviewService::new(store), id.to_hex())
    }

    #[tokio::test]
    async fn reviews_append_in_order() {
        let (store, service, id) = with_book().await;
        service.add_review(&id, Review::new(5, "classic")).await.unwrap();
        service.add_review(&id, Review::new(3, "long")).await.unwrap();

        let book = store
            .find_one(&BookFilter::Id(BookId::parse(&id).unwrap()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            book.reviews,
            vec![Review::new(5, "classic"), Review::new(3, "long")]
        );
    }

    #[tokio::test]
    async fn average_reflects_added_reviews() {
        let (_, service, id) = with_book().await;
        assert_eq!(service.average_rating(&id).await.unwrap().average_rating, 0.0);

        service.add_review(&id, Review::new(4, "good")).await.unwrap();
        service.add_review(&id, Review::new(2, "meh")).await.unwrap();
        assert_eq!(service.average_rating(&id).await.unwrap().average_rating, 3.0);
    }

    #[tokio::test]
    async fn out_of_range_rating_is_rejected() {
        let (store, service, id) = with_book().await;
        let err = service.add_review(&id, Review::new(9, "")).await.unwrap_err();
        assert!(matches!(err, BookstoreError::Validation(_)));

        let book = store.find(&BookFilter::All).await.unwrap().remove(0);
        assert!(book.reviews.is_empty());
    }

    #[tokio::test]
    async fn missing_and_invalid_ids() {
        let (_, service, _) = with_book().await;
        let missing = BookId::new().to_hex();
        assert!(matches!(
            service.add_review(&missing, Review::new(3, "")).await,
            Err(BookstoreError::NotFound(_))
        ));
        assert!(matches!(
            service.average_rating(&missing).await,
            Err(BookstoreError::NotFound(_))
        ));
        assert!(matches!(
            service.average_rating("123").await,
            Err(BookstoreError::InvalidId(_))
        ));
    }
}
