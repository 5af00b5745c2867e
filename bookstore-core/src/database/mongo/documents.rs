//! BSON shapes and query builders for the `Books` collection.
//!
//! The builders are pure so they can be unit tested without a server.

use bookstore_model::{
    Book, BookId, Review,
    numbers::{deserialize_i32, whole_i32},
};
use mongodb::bson::{self, Bson, Document, doc, oid::ObjectId};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::database::ports::books::{
    BookField, BookFilter, FieldAssignment, FieldValue,
};

/// Stored layout of a book. Differs from [`Book`]'s serde form only in that
/// `_id` is a native ObjectId rather than its hex string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(
        rename = "book_name",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub genre: String,
    #[serde(
        rename = "release_date",
        default,
        skip_serializing_if = "is_zero",
        deserialize_with = "deserialize_i32"
    )]
    pub release_year: i32,
    #[serde(
        default,
        skip_serializing_if = "is_zero",
        deserialize_with = "deserialize_i32"
    )]
    pub stock_count: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<Review>,
}

fn is_zero(value: &i32) -> bool {
    *value == 0
}

impl From<BookDocument> for Book {
    fn from(doc: BookDocument) -> Self {
        Book {
            id: doc.id.map(BookId::from),
            name: doc.name,
            author: doc.author,
            genre: doc.genre,
            release_year: doc.release_year,
            stock_count: doc.stock_count,
            reviews: doc.reviews,
        }
    }
}

impl From<&Book> for BookDocument {
    fn from(book: &Book) -> Self {
        BookDocument {
            id: book.id.as_ref().map(BookId::to_object_id),
            name: book.name.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            release_year: book.release_year,
            stock_count: book.stock_count,
            reviews: book.reviews.clone(),
        }
    }
}

pub fn encode_book(book: &Book) -> Result<Document, bson::ser::Error> {
    bson::to_document(&BookDocument::from(book))
}

pub fn decode_book(document: Document) -> Result<Book, bson::de::Error> {
    bson::from_document::<BookDocument>(document).map(Book::from)
}

/// Decode for listings: undecodable documents are logged and dropped.
pub fn decode_listed_book(document: Document) -> Option<Book> {
    let raw_id = document.get_object_id("_id").ok();
    match decode_book(document) {
        Ok(book) => Some(book),
        Err(err) => {
            warn!(
                id = ?raw_id,
                error = %err,
                "skipping book document that failed to decode"
            );
            None
        }
    }
}

fn field_bson(value: &FieldValue) -> Bson {
    match value {
        FieldValue::Text(text) => Bson::String(text.clone()),
        FieldValue::Integer(number) => Bson::Int32(*number),
    }
}

fn field_eq(field: BookField, value: Bson) -> Document {
    let mut filter = Document::new();
    filter.insert(field.key(), value);
    filter
}

pub fn id_filter(id: BookId) -> Document {
    doc! { "_id": id.to_object_id() }
}

pub fn filter_document(filter: &BookFilter) -> Document {
    match filter {
        BookFilter::All => Document::new(),
        BookFilter::Id(id) => id_filter(*id),
        BookFilter::Name(name) => {
            field_eq(BookField::Name, Bson::String(name.clone()))
        }
        BookFilter::Author(author) => {
            field_eq(BookField::Author, Bson::String(author.clone()))
        }
        BookFilter::Genre(genre) => {
            field_eq(BookField::Genre, Bson::String(genre.clone()))
        }
        BookFilter::ReleaseYear(year) => {
            field_eq(BookField::ReleaseYear, Bson::Int32(*year))
        }
    }
}

/// `$set` update for the given assignments, `None` when there is nothing to
/// write.
pub fn set_document(assignments: &[FieldAssignment]) -> Option<Document> {
    if assignments.is_empty() {
        return None;
    }
    let mut set = Document::new();
    for assignment in assignments {
        set.insert(assignment.field.key(), field_bson(&assignment.value));
    }
    Some(doc! { "$set": set })
}

/// `$push` appending one review, stored in [`Review`]'s own serde shape.
pub fn push_review_document(
    review: &Review,
) -> Result<Document, bson::ser::Error> {
    let entry = bson::to_document(review)?;
    Ok(doc! { "$push": { "reviews": entry } })
}

/// Two-stage pipeline: group by the field, then project the group key back
/// under the field's own name.
pub fn distinct_pipeline(field: BookField) -> Vec<Document> {
    let mut project = doc! { "_id": 0 };
    project.insert(field.key(), "$_id");
    vec![
        doc! { "$group": { "_id": format!("${}", field.key()) } },
        doc! { "$project": project },
    ]
}

/// Extract the projected key from one group produced by
/// [`distinct_pipeline`]. Groups with a missing, null or non-scalar key are
/// dropped.
pub fn decode_group(field: BookField, group: &Document) -> Option<FieldValue> {
    match group.get(field.key()) {
        Some(Bson::String(text)) => Some(FieldValue::Text(text.clone())),
        Some(Bson::Int32(number)) => Some(FieldValue::Integer(*number)),
        Some(Bson::Int64(number)) => {
            i32::try_from(*number).ok().map(FieldValue::Integer)
        }
        Some(Bson::Double(number)) if whole_i32(*number).is_some() => {
            whole_i32(*number).map(FieldValue::Integer)
        }
        Some(Bson::Null) | None => None,
        Some(other) => {
            warn!(
                field = %field,
                value = %other,
                "skipping group with unexpected key type"
            );
            None
        }
    }
}
