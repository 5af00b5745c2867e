//! MongoDB-backed implementation of the store port.

pub mod books;
pub mod documents;

pub use books::MongoBookStore;
