use thiserror::Error;
use url::Url;

use super::models::{Config, CorsConfig, StoreBackend};

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("MONGO_URI is required when the mongo store is selected")]
    MissingMongoUri,
    #[error("MONGO_URI must start with mongodb:// or mongodb+srv://")]
    InvalidMongoUri,
    #[error("database name must not be empty")]
    EmptyDatabaseName,
    #[error("store operation timeout must be greater than zero")]
    ZeroOperationTimeout,
    #[error("invalid CORS configuration: {reason}")]
    InvalidCorsConfig { reason: String },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    match (config.store, config.database.uri.as_deref()) {
        (StoreBackend::Mongo, None) => {
            return Err(ConfigGuardRailError::MissingMongoUri);
        }
        (_, Some(uri)) if !is_mongo_uri(uri) => {
            return Err(ConfigGuardRailError::InvalidMongoUri);
        }
        (StoreBackend::Memory, _) if !config.dev_mode => {
            warnings.push_with_hint(
                "In-memory store selected; catalog contents are lost on restart",
                "Use --store mongo with MONGO_URI for persistent storage",
            );
        }
        _ => {}
    }

    if config.database.name.trim().is_empty() {
        return Err(ConfigGuardRailError::EmptyDatabaseName);
    }
    if config.database.op_timeout.is_zero() {
        return Err(ConfigGuardRailError::ZeroOperationTimeout);
    }

    validate_cors(&config.cors)?;
    if !config.dev_mode && config.cors.is_wildcard_included() {
        warnings.push_with_hint(
            "CORS allows any origin while DEV_MODE is false",
            "Set CORS_ALLOWED_ORIGINS to the front-end origins you serve",
        );
    }

    Ok(warnings)
}

fn is_mongo_uri(uri: &str) -> bool {
    let uri = uri.trim();
    uri.starts_with("mongodb://") || uri.starts_with("mongodb+srv://")
}

fn validate_cors(cors: &CorsConfig) -> Result<(), ConfigGuardRailError> {
    if cors.allowed_origins.is_empty() {
        return Err(ConfigGuardRailError::InvalidCorsConfig {
            reason: "CORS_ALLOWED_ORIGINS must include at least one origin"
                .into(),
        });
    }

    for origin in &cors.allowed_origins {
        if origin.trim() == "*" {
            continue;
        }
        let parsed = Url::parse(origin).map_err(|_| {
            ConfigGuardRailError::InvalidCorsConfig {
                reason: format!("invalid origin `{origin}`"),
            }
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigGuardRailError::InvalidCorsConfig {
                reason: format!("origin `{origin}` must use http or https"),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DatabaseConfig;
    use std::time::Duration;

    fn mongo_config(uri: &str) -> Config {
        Config {
            database: DatabaseConfig {
                uri: Some(uri.to_string()),
                ..DatabaseConfig::default()
            },
            ..Config::default()
        }
    }

    #[test]
    fn mongo_store_requires_uri() {
        let config = Config::default();
        assert!(matches!(
            apply_guard_rails(&config),
            Err(ConfigGuardRailError::MissingMongoUri)
        ));
    }

    #[test]
    fn memory_store_runs_without_uri_but_warns() {
        let config = Config {
            store: StoreBackend::Memory,
            ..Config::default()
        };
        let warnings = apply_guard_rails(&config).unwrap();
        assert!(
            warnings
                .items
                .iter()
                .any(|w| w.message.contains("In-memory store"))
        );
    }

    #[test]
    fn rejects_non_mongo_schemes() {
        let config = mongo_config("postgres://localhost/db");
        assert!(matches!(
            apply_guard_rails(&config),
            Err(ConfigGuardRailError::InvalidMongoUri)
        ));
        assert!(apply_guard_rails(&mongo_config("mongodb+srv://cluster.test")).is_ok());
    }

    #[test]
    fn wildcard_cors_warns_outside_dev_mode() {
        let config = mongo_config("mongodb://localhost:27017");
        let warnings = apply_guard_rails(&config).unwrap();
        assert!(warnings.items.iter().any(|w| w.message.contains("CORS")));

        let dev = Config {
            dev_mode: true,
            ..mongo_config("mongodb://localhost:27017")
        };
        assert!(apply_guard_rails(&dev).unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_origins_and_zero_timeout() {
        let mut config = mongo_config("mongodb://localhost:27017");
        config.cors.allowed_origins = vec!["ftp://files.test".into()];
        assert!(matches!(
            apply_guard_rails(&config),
            Err(ConfigGuardRailError::InvalidCorsConfig { .. })
        ));

        let mut config = mongo_config("mongodb://localhost:27017");
        config.database.op_timeout = Duration::ZERO;
        assert!(matches!(
            apply_guard_rails(&config),
            Err(ConfigGuardRailError::ZeroOperationTimeout)
        ));
    }
}
