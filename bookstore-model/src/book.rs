use crate::{ids::BookId, review::Review};

/// A book record as stored in the `Books` collection and returned by the API.
///
/// Field names on the wire follow the historical document layout
/// (`book_name`, `release_date`, ...) so previously stored documents keep
/// decoding. Empty values are omitted when serializing and default when
/// missing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Book {
    #[cfg_attr(
        feature = "serde",
        serde(rename = "_id", default, skip_serializing_if = "Option::is_none")
    )]
    pub id: Option<BookId>,
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "book_name",
            default,
            skip_serializing_if = "String::is_empty"
        )
    )]
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "String::is_empty")
    )]
    pub author: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "String::is_empty")
    )]
    pub genre: String,
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "release_date",
            default,
            skip_serializing_if = "is_zero",
            deserialize_with = "crate::numbers::deserialize_i32"
        )
    )]
    pub release_year: i32,
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            skip_serializing_if = "is_zero",
            deserialize_with = "crate::numbers::deserialize_i32"
        )
    )]
    pub stock_count: i32,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub reviews: Vec<Review>,
}

#[cfg(feature = "serde")]
fn is_zero(value: &i32) -> bool {
    *value == 0
}

impl Book {
    pub fn new(
        name: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        release_year: i32,
    ) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
            genre: genre.into(),
            release_year,
            ..Self::default()
        }
    }

    pub fn with_stock(mut self, stock_count: i32) -> Self {
        self.stock_count = stock_count;
        self
    }

    pub fn with_id(mut self, id: BookId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Partial update for a book. `None`, empty strings and a zero year all mean
/// "leave the stored value alone".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BookPatch {
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "book_name",
            default,
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub name: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub author: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub genre: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "release_date",
            default,
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub release_year: Option<i32>,
}

impl BookPatch {
    pub fn name(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }

    pub fn author(&self) -> Option<&str> {
        non_empty(self.author.as_deref())
    }

    pub fn genre(&self) -> Option<&str> {
        non_empty(self.genre.as_deref())
    }

    pub fn release_year(&self) -> Option<i32> {
        self.release_year.filter(|year| *year != 0)
    }

    /// True when applying the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.name().is_none()
            && self.author().is_none()
            && self.genre().is_none()
            && self.release_year().is_none()
    }

    /// Apply the supplied fields onto an in-memory book.
    pub fn apply_to(&self, book: &mut Book) {
        if let Some(name) = self.name() {
            book.name = name.to_string();
        }
        if let Some(author) = self.author() {
            book.author = author.to_string();
        }
        if let Some(genre) = self.genre() {
            book.genre = genre.to_string();
        }
        if let Some(year) = self.release_year() {
            book.release_year = year;
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
