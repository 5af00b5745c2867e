use std::{any::type_name_of_val, fmt, sync::Arc};

use bookstore_model::{Book, BookId, BookPatch};
use tracing::{info, warn};

use super::load_book;
use crate::database::ports::books::{
    BookField, BookFilter, BookStore, FieldAssignment,
};
use crate::error::{BookstoreError, Result};

/// Create, read, update and delete operations over books.
pub struct BookRepository<S: BookStore + ?Sized> {
    store: Arc<S>,
}

impl<S> fmt::Debug for BookRepository<S>
where
    S: BookStore + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store_type = type_name_of_val(self.store.as_ref());
        f.debug_struct("BookRepository")
            .field("store_type", &store_type)
            .finish()
    }
}

impl<S> BookRepository<S>
where
    S: BookStore + ?Sized,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Insert a new book and return it with its assigned id.
    ///
    /// The name must be non-empty and not already used by another book. The
    /// uniqueness check and the insert are separate round trips, so two
    /// concurrent creates with the same name can both succeed.
    pub async fn create(&self, mut book: Book) -> Result<Book> {
        if book.name.trim().is_empty() {
            return Err(BookstoreError::Validation(
                "book_name must not be empty".into(),
            ));
        }
        for review in &book.reviews {
            review.validate()?;
        }

        let existing = self
            .store
            .count(&BookFilter::Name(book.name.clone()))
            .await?;
        if existing > 0 {
            return Err(BookstoreError::Duplicate(format!(
                "a book named '{}' already exists",
                book.name
            )));
        }

        book.id = None;
        let id = self.store.insert(&book).await?;
        info!(book_id = %id, name = %book.name, "book created");
        Ok(book.with_id(id))
    }

    pub async fn list_all(&self) -> Result<Vec<Book>> {
        self.store.find(&BookFilter::All).await
    }

    /// Look a book up by its client supplied id.
    pub async fn get_by_id(&self, raw_id: &str) -> Result<Book> {
        let id = BookId::parse(raw_id)?;
        self.get(id).await
    }

    pub async fn get(&self, id: BookId) -> Result<Book> {
        load_book(self.store.as_ref(), id).await
    }

    pub async fn list_by_genre(&self, genre: &str) -> Result<Vec<Book>> {
        self.store.find(&BookFilter::Genre(genre.to_string())).await
    }

    pub async fn list_by_author(&self, author: &str) -> Result<Vec<Book>> {
        self.store.find(&BookFilter::Author(author.to_string())).await
    }

    pub async fn list_by_year(&self, year: i32) -> Result<Vec<Book>> {
        self.store.find(&BookFilter::ReleaseYear(year)).await
    }

    /// Overwrite the supplied fields of a book. Empty strings and a zero year
    /// leave the stored value untouched; a patch without any usable field
    /// only confirms the book exists.
    pub async fn update(&self, raw_id: &str, patch: &BookPatch) -> Result<()> {
        let id = BookId::parse(raw_id)?;
        let assignments = patch_assignments(patch);
        if assignments.is_empty() {
            self.get(id).await?;
            return Ok(());
        }

        let matched = self.store.set_fields(id, &assignments).await?;
        if matched == 0 {
            return Err(BookstoreError::NotFound(id.to_hex()));
        }
        info!(book_id = %id, fields = assignments.len(), "book updated");
        Ok(())
    }

    pub async fn delete(&self, raw_id: &str) -> Result<()> {
        let id = BookId::parse(raw_id)?;
        self.get(id).await?;

        let removed = self.store.delete(id).await.map_err(|err| match err {
            BookstoreError::Query(msg) => BookstoreError::Delete(msg),
            other => other,
        })?;
        if removed == 0 {
            warn!(book_id = %id, "book vanished before it could be deleted");
            return Err(BookstoreError::Delete(format!(
                "no document removed for {id}"
            )));
        }
        info!(book_id = %id, "book deleted");
        Ok(())
    }
}

fn patch_assignments(patch: &BookPatch) -> Vec<FieldAssignment> {
    let mut assignments = Vec::new();
    if let Some(name) = patch.name() {
        assignments.push(FieldAssignment::text(BookField::Name, name));
    }
    if let Some(author) = patch.author() {
        assignments.push(FieldAssignment::text(BookField::Author, author));
    }
    if let Some(genre) = patch.genre() {
        assignments.push(FieldAssignment::text(BookField::Genre, genre));
    }
    if let Some(year) = patch.release_year() {
        assignments.push(FieldAssignment::integer(BookField::ReleaseYear, year));
    }
    assignments
}
