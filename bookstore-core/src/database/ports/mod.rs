//! Repository ports (interfaces) used by the catalog services.
//! Implementations live in `database::mongo` and `database::memory`.

pub mod books;
