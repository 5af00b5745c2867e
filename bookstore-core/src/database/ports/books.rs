use std::fmt;

use async_trait::async_trait;
use bookstore_model::{Book, BookId, Review};

use crate::error::Result;

/// Document fields that can be filtered on, grouped by, or overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookField {
    Name,
    Author,
    Genre,
    ReleaseYear,
}

impl BookField {
    /// Key of the field inside a stored book document.
    pub fn key(self) -> &'static str {
        match self {
            BookField::Name => "book_name",
            BookField::Author => "author",
            BookField::Genre => "genre",
            BookField::ReleaseYear => "release_date",
        }
    }
}

impl fmt::Display for BookField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A scalar field value, as written by an update or produced by a grouping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Text(String),
    Integer(i32),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            FieldValue::Integer(_) => None,
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            FieldValue::Integer(value) => Some(*value),
            FieldValue::Text(_) => None,
        }
    }
}

/// Overwrite of a single field, applied with `$set` semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAssignment {
    pub field: BookField,
    pub value: FieldValue,
}

impl FieldAssignment {
    pub fn text(field: BookField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: FieldValue::Text(value.into()),
        }
    }

    pub fn integer(field: BookField, value: i32) -> Self {
        Self {
            field,
            value: FieldValue::Integer(value),
        }
    }
}

/// Exact-match selectors supported by the store. String matches are
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    All,
    Id(BookId),
    Name(String),
    Author(String),
    Genre(String),
    ReleaseYear(i32),
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            BookFilter::All => true,
            BookFilter::Id(id) => book.id.as_ref() == Some(id),
            BookFilter::Name(name) => &book.name == name,
            BookFilter::Author(author) => &book.author == author,
            BookFilter::Genre(genre) => &book.genre == genre,
            BookFilter::ReleaseYear(year) => book.release_year == *year,
        }
    }
}

/// Narrow query interface over the `Books` collection.
///
/// Every operation is a single round trip and only single-document atomicity
/// is assumed. Listing operations skip documents that fail to decode instead
/// of failing the whole call.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert a new book and return the identifier assigned by the store.
    async fn insert(&self, book: &Book) -> Result<BookId>;

    async fn find(&self, filter: &BookFilter) -> Result<Vec<Book>>;

    async fn find_one(&self, filter: &BookFilter) -> Result<Option<Book>>;

    async fn count(&self, filter: &BookFilter) -> Result<u64>;

    /// Overwrite the given fields on one book. Returns the number of matched
    /// documents (0 or 1).
    async fn set_fields(
        &self,
        id: BookId,
        assignments: &[FieldAssignment],
    ) -> Result<u64>;

    /// Append a review to a book. Returns the number of matched documents.
    async fn push_review(&self, id: BookId, review: &Review) -> Result<u64>;

    /// Remove one book. Returns the number of removed documents.
    async fn delete(&self, id: BookId) -> Result<u64>;

    /// Distinct values of `field` across all books, in store order. Groups
    /// whose key cannot be decoded are skipped.
    async fn distinct(&self, field: BookField) -> Result<Vec<FieldValue>>;

    /// Cheap liveness probe used by health checks.
    async fn ping(&self) -> Result<()>;
}
