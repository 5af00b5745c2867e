//! Configuration library for the bookstore service.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment variables (optionally seeded from a `.env` file). The server
//! applies command line overrides on top of the loaded [`Config`].
#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, ConfigLoaderOptions, error::ConfigLoadError};
pub use models::sources::{EnvConfig, FileConfig};
pub use models::{
    Config, ConfigMetadata, CorsConfig, DatabaseConfig, ServerConfig,
    StoreBackend,
};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
