use std::time::Duration;

use async_trait::async_trait;
use bookstore_model::{Book, BookId, Review};
use futures::TryStreamExt;
use mongodb::{Collection, bson::Document};
use tracing::{debug, instrument};

use super::documents::{
    decode_book, decode_group, decode_listed_book, distinct_pipeline,
    encode_book, filter_document, id_filter, push_review_document,
    set_document,
};
use crate::database::{
    client::{BOOKS_COLLECTION, StoreClient},
    ports::books::{
        BookField, BookFilter, BookStore, FieldAssignment, FieldValue,
    },
    with_deadline,
};
use crate::error::{BookstoreError, Result};

/// [`BookStore`] over the `Books` collection.
#[derive(Debug, Clone)]
pub struct MongoBookStore {
    client: StoreClient,
    collection: Collection<Document>,
}

impl MongoBookStore {
    pub fn new(client: StoreClient) -> Self {
        Self::with_collection(client, BOOKS_COLLECTION)
    }

    pub fn with_collection(client: StoreClient, collection: &str) -> Self {
        let collection = client.collection(collection);
        Self { client, collection }
    }

    fn deadline(&self) -> Duration {
        self.client.op_timeout()
    }
}

#[async_trait]
impl BookStore for MongoBookStore {
    #[instrument(skip_all, fields(name = %book.name))]
    async fn insert(&self, book: &Book) -> Result<BookId> {
        let document = encode_book(book).map_err(|err| {
            BookstoreError::Query(format!("failed to encode book: {err}"))
        })?;
        let result = with_deadline("insert book", self.deadline(), async {
            self.collection.insert_one(document).await
        })
        .await?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            BookstoreError::Query(format!(
                "store returned a non ObjectId key: {}",
                result.inserted_id
            ))
        })?;
        debug!(book_id = %id, "book document inserted");
        Ok(BookId::from(id))
    }

    #[instrument(skip(self))]
    async fn find(&self, filter: &BookFilter) -> Result<Vec<Book>> {
        let filter = filter_document(filter);
        with_deadline("find books", self.deadline(), async {
            let mut cursor = self.collection.find(filter).await?;
            let mut books = Vec::new();
            while let Some(document) = cursor.try_next().await? {
                books.extend(decode_listed_book(document));
            }
            Ok::<_, mongodb::error::Error>(books)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn find_one(&self, filter: &BookFilter) -> Result<Option<Book>> {
        let filter = filter_document(filter);
        let document = with_deadline("find book", self.deadline(), async {
            self.collection.find_one(filter).await
        })
        .await?;

        document
            .map(decode_book)
            .transpose()
            .map_err(|err| {
                BookstoreError::Query(format!(
                    "stored book failed to decode: {err}"
                ))
            })
    }

    async fn count(&self, filter: &BookFilter) -> Result<u64> {
        let filter = filter_document(filter);
        with_deadline("count books", self.deadline(), async {
            self.collection.count_documents(filter).await
        })
        .await
    }

    #[instrument(skip(self, assignments), fields(book_id = %id))]
    async fn set_fields(
        &self,
        id: BookId,
        assignments: &[FieldAssignment],
    ) -> Result<u64> {
        // An empty `$set` is rejected by the server, so only check existence.
        let Some(update) = set_document(assignments) else {
            return self.count(&BookFilter::Id(id)).await;
        };
        let result = with_deadline("update book", self.deadline(), async {
            self.collection.update_one(id_filter(id), update).await
        })
        .await?;
        Ok(result.matched_count)
    }

    #[instrument(skip(self, review), fields(book_id = %id))]
    async fn push_review(&self, id: BookId, review: &Review) -> Result<u64> {
        let update = push_review_document(review).map_err(|err| {
            BookstoreError::Query(format!("failed to encode review: {err}"))
        })?;
        let result = with_deadline("add review", self.deadline(), async {
            self.collection.update_one(id_filter(id), update).await
        })
        .await?;
        Ok(result.matched_count)
    }

    #[instrument(skip(self), fields(book_id = %id))]
    async fn delete(&self, id: BookId) -> Result<u64> {
        let result = with_deadline("delete book", self.deadline(), async {
            self.collection.delete_one(id_filter(id)).await
        })
        .await?;
        Ok(result.deleted_count)
    }

    #[instrument(skip(self))]
    async fn distinct(&self, field: BookField) -> Result<Vec<FieldValue>> {
        let pipeline = distinct_pipeline(field);
        with_deadline("aggregate distinct values", self.deadline(), async {
            let mut cursor = self.collection.aggregate(pipeline).await?;
            let mut values = Vec::new();
            while let Some(group) = cursor.try_next().await? {
                values.extend(decode_group(field, &group));
            }
            Ok::<_, mongodb::error::Error>(values)
        })
        .await
    }

    async fn ping(&self) -> Result<()> {
        self.client.ping().await
    }
}
