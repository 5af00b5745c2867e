//! HTTP request handlers organized by functionality

pub mod books;
pub mod catalog;
pub mod reviews;
pub mod system;

use serde::Serialize;

/// Body of endpoints that only report success.
#[derive(Debug, Clone, Serialize)]
pub struct StatusMessage {
    pub message: String,
}

impl StatusMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
