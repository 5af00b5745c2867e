//! Process-local [`BookStore`] used by tests and `--store memory` runs.
//!
//! Documents are kept as raw JSON values in insertion order so the adapter
//! exhibits the same "skip what does not decode" behavior as the MongoDB one.

use std::collections::HashSet;

use async_trait::async_trait;
use bookstore_model::{Book, BookId, Review, numbers::whole_i32};
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::warn;

use crate::database::ports::books::{
    BookField, BookFilter, BookStore, FieldAssignment, FieldValue,
};
use crate::error::{BookstoreError, Result};

#[derive(Debug, Default)]
pub struct InMemoryBookStore {
    documents: RwLock<Vec<Value>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document as-is, bypassing encoding. Lets callers seed records
    /// that the typed API could never produce.
    pub async fn insert_raw(&self, document: Value) {
        self.documents.write().await.push(document);
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    async fn decoded(&self) -> Vec<Book> {
        self.documents
            .read()
            .await
            .iter()
            .filter_map(decode)
            .collect()
    }
}

fn decode(document: &Value) -> Option<Book> {
    match serde_json::from_value::<Book>(document.clone()) {
        Ok(book) => Some(book),
        Err(err) => {
            warn!(
                id = ?document.get("_id"),
                error = %err,
                "skipping book document that failed to decode"
            );
            None
        }
    }
}

fn has_id(document: &Value, id: &str) -> bool {
    document.get("_id").and_then(Value::as_str) == Some(id)
}

fn raw_field_is(document: &Value, field: BookField, expected: &str) -> bool {
    document.get(field.key()).and_then(Value::as_str) == Some(expected)
}

fn raw_matches(filter: &BookFilter, document: &Value) -> bool {
    match filter {
        BookFilter::All => true,
        BookFilter::Id(id) => has_id(document, &id.to_hex()),
        BookFilter::Name(name) => raw_field_is(document, BookField::Name, name),
        BookFilter::Author(author) => {
            raw_field_is(document, BookField::Author, author)
        }
        BookFilter::Genre(genre) => {
            raw_field_is(document, BookField::Genre, genre)
        }
        BookFilter::ReleaseYear(year) => document
            .get(BookField::ReleaseYear.key())
            .and_then(Value::as_f64)
            .is_some_and(|stored| stored == f64::from(*year)),
    }
}

fn field_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Text(text) => Value::String(text.clone()),
        FieldValue::Integer(number) => Value::from(*number),
    }
}

fn group_key(field: BookField, value: &Value) -> Option<FieldValue> {
    match value {
        Value::String(text) => Some(FieldValue::Text(text.clone())),
        Value::Number(number) => {
            let integer = match number.as_i64() {
                Some(n) => i32::try_from(n).ok(),
                None => number.as_f64().and_then(whole_i32),
            };
            if integer.is_none() {
                warn!(
                    field = %field,
                    value = %number,
                    "skipping group with unexpected key type"
                );
            }
            integer.map(FieldValue::Integer)
        }
        Value::Null => None,
        other => {
            warn!(
                field = %field,
                value = %other,
                "skipping group with unexpected key type"
            );
            None
        }
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn insert(&self, book: &Book) -> Result<BookId> {
        let id = BookId::new();
        let stored = book.clone().with_id(id);
        let document = serde_json::to_value(&stored).map_err(|err| {
            BookstoreError::Query(format!("failed to encode book: {err}"))
        })?;
        self.documents.write().await.push(document);
        Ok(id)
    }

    async fn find(&self, filter: &BookFilter) -> Result<Vec<Book>> {
        Ok(self
            .decoded()
            .await
            .into_iter()
            .filter(|book| filter.matches(book))
            .collect())
    }

    async fn find_one(&self, filter: &BookFilter) -> Result<Option<Book>> {
        Ok(self
            .decoded()
            .await
            .into_iter()
            .find(|book| filter.matches(book)))
    }

    /// Counts stored documents whose raw fields match, whether or not the
    /// rest of the document decodes.
    async fn count(&self, filter: &BookFilter) -> Result<u64> {
        let matched = self
            .documents
            .read()
            .await
            .iter()
            .filter(|document| raw_matches(filter, document))
            .count();
        Ok(matched as u64)
    }

    async fn set_fields(
        &self,
        id: BookId,
        assignments: &[FieldAssignment],
    ) -> Result<u64> {
        let hex = id.to_hex();
        let mut documents = self.documents.write().await;
        let Some(Value::Object(fields)) =
            documents.iter_mut().find(|doc| has_id(doc, &hex))
        else {
            return Ok(0);
        };
        for assignment in assignments {
            fields.insert(
                assignment.field.key().to_string(),
                field_json(&assignment.value),
            );
        }
        Ok(1)
    }

    async fn push_review(&self, id: BookId, review: &Review) -> Result<u64> {
        let hex = id.to_hex();
        let entry = serde_json::to_value(review).map_err(|err| {
            BookstoreError::Query(format!("failed to encode review: {err}"))
        })?;
        let mut documents = self.documents.write().await;
        let Some(Value::Object(fields)) =
            documents.iter_mut().find(|doc| has_id(doc, &hex))
        else {
            return Ok(0);
        };
        let reviews = fields
            .entry("reviews")
            .or_insert_with(|| Value::Array(Vec::new()));
        match reviews {
            Value::Array(items) => items.push(entry),
            other => *other = Value::Array(vec![entry]),
        }
        Ok(1)
    }

    async fn delete(&self, id: BookId) -> Result<u64> {
        let hex = id.to_hex();
        let mut documents = self.documents.write().await;
        match documents.iter().position(|doc| has_id(doc, &hex)) {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn distinct(&self, field: BookField) -> Result<Vec<FieldValue>> {
        let documents = self.documents.read().await;
        let mut seen = HashSet::new();
        let mut values = Vec::new();
        for document in documents.iter() {
            let raw = document
                .as_object()
                .and_then(|fields: &Map<String, Value>| fields.get(field.key()))
                .unwrap_or(&Value::Null);
            if let Some(value) = group_key(field, raw)
                && seen.insert(value.clone())
            {
                values.push(value);
            }
        }
        Ok(values)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
