use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::StoreBackend;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub database: FileDatabaseConfig,
    #[serde(default)]
    pub cors: FileCorsConfig,
    pub store: Option<StoreBackend>,
    pub dev_mode: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileDatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub op_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCorsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_origins: Option<Vec<String>>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub mongo_uri: Option<String>,
    pub mongo_database: Option<String>,
    pub mongo_op_timeout_secs: Option<u64>,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub store: Option<StoreBackend>,
    pub dev_mode: Option<bool>,
    pub config_path: Option<PathBuf>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. `gather` uses the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut env_config = Self::default();

        env_config.server_host = lookup("SERVER_HOST");
        env_config.server_port =
            lookup("SERVER_PORT").and_then(|s| s.trim().parse().ok());
        // MONGOURI is the name older deployments exported.
        env_config.mongo_uri = lookup("MONGO_URI")
            .or_else(|| lookup("MONGOURI"))
            .filter(|value| !value.trim().is_empty());
        env_config.mongo_database = lookup("MONGO_DATABASE")
            .filter(|value| !value.trim().is_empty());
        env_config.mongo_op_timeout_secs = lookup("MONGO_OP_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse().ok());

        env_config.cors_allowed_origins =
            lookup("CORS_ALLOWED_ORIGINS").map(|raw| parse_csv(&raw));
        env_config.store =
            lookup("BOOKSTORE_STORE").and_then(|raw| raw.parse().ok());
        env_config.dev_mode = lookup("DEV_MODE").and_then(|raw| parse_bool(&raw));
        env_config.config_path = lookup("BOOKSTORE_CONFIG").map(PathBuf::from);

        env_config
    }
}

fn parse_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|part| {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
