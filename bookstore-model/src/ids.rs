use std::{fmt, str::FromStr};

use bson::oid::ObjectId;

use crate::error::ModelError;

/// Strongly typed book identifier backed by the store's native ObjectId.
///
/// On the wire the id is always the 24 character hex form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookId(pub ObjectId);

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl BookId {
    pub fn new() -> Self {
        BookId(ObjectId::new())
    }

    /// Parse a client supplied id. Anything that is not a 24 digit hex string
    /// is rejected before the store is ever consulted.
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        ObjectId::parse_str(raw.trim())
            .map(BookId)
            .map_err(|_| ModelError::InvalidId(raw.to_string()))
    }

    pub fn as_object_id(&self) -> &ObjectId {
        &self.0
    }

    pub fn to_object_id(&self) -> ObjectId {
        self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl From<ObjectId> for BookId {
    fn from(value: ObjectId) -> Self {
        BookId(value)
    }
}

impl FromStr for BookId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookId::parse(s)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BookId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for BookId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
        BookId::parse(&raw).map_err(serde::de::Error::custom)
    }
}
