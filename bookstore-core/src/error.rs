use bookstore_model::ModelError;
use thiserror::Error;

/// Every failure the catalog layer can report. Callers branch on the variant,
/// never on the message text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookstoreError {
    /// The store could not be reached or the URI was rejected.
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Invalid book id: {0}")]
    InvalidId(String),

    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("Duplicate book: {0}")]
    Duplicate(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A store query, insert or update failed unexpectedly.
    #[error("Query failed: {0}")]
    Query(String),

    #[error("Delete failed: {0}")]
    Delete(String),
}

impl BookstoreError {
    /// True for errors caused by the request rather than by the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            BookstoreError::InvalidId(_)
                | BookstoreError::NotFound(_)
                | BookstoreError::Duplicate(_)
                | BookstoreError::Validation(_)
        )
    }
}

impl From<ModelError> for BookstoreError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::InvalidId(raw) => BookstoreError::InvalidId(raw),
            ModelError::InvalidRating(_) => {
                BookstoreError::Validation(err.to_string())
            }
        }
    }
}

impl From<mongodb::error::Error> for BookstoreError {
    fn from(err: mongodb::error::Error) -> Self {
        BookstoreError::Query(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BookstoreError>;
