pub mod error;

use once_cell::sync::Lazy;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::debug;

use crate::{
    models::{
        Config, ConfigMetadata, CorsConfig, DEFAULT_DATABASE_NAME, DEFAULT_HOST,
        DEFAULT_OP_TIMEOUT, DEFAULT_PORT, DatabaseConfig, ServerConfig,
        StoreBackend,
        sources::{EnvConfig, FileConfig},
    },
    validation::{self, ConfigWarnings},
};
use error::ConfigLoadError;

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("bookstore.toml"),
        PathBuf::from("config/bookstore.toml"),
    ]
});

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    /// Forces the store backend regardless of file and environment, so
    /// guard rails judge the backend that will actually run.
    pub store: Option<StoreBackend>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn with_store(mut self, store: StoreBackend) -> Self {
        self.options.store = Some(store);
        self
    }

    /// Load `.env`, then the config file, then the process environment.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        let mut load = self.load_from(EnvConfig::gather())?;
        load.config.metadata.env_file_loaded = env_file_loaded;
        Ok(load)
    }

    /// Same as [`ConfigLoader::load`] with an already gathered environment
    /// and without touching `.env`.
    pub fn load_from(
        &self,
        env: EnvConfig,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        let (config, warnings) =
            self.compose_config(file_config, env, config_path)?;
        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let mut source = ConfigPathSource::default();

        if let Some(explicit) = &self.options.config_path {
            source.explicit = Some(explicit.clone());
        } else if let Some(from_env) = &env_config.config_path {
            source.env = Some(from_env.clone());
        } else {
            source.default = DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
                .cloned();
        }

        let Some((path, provenance)) = source.resolved_path() else {
            return Ok((None, None));
        };

        if !path.exists() {
            if provenance.is_explicit() {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        let file_config = read_file_config(&path)?;
        debug!(path = %path.display(), ?provenance, "loaded configuration file");
        Ok((Some(file_config), Some(path)))
    }

    fn compose_config(
        &self,
        file_config: Option<FileConfig>,
        env: EnvConfig,
        config_path: Option<PathBuf>,
    ) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
        let mut warnings = ConfigWarnings::default();

        if file_config.is_none() {
            warnings.push_with_hint(
                "No bookstore.toml detected; falling back to environment variables",
                "Create bookstore.toml or pass --config to pin settings in a file",
            );
        }

        let FileConfig {
            server: file_server,
            database: file_database,
            cors: file_cors,
            store: file_store,
            dev_mode: file_dev_mode,
        } = file_config.unwrap_or_default();

        let server = ServerConfig {
            host: env
                .server_host
                .or(file_server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: env.server_port.or(file_server.port).unwrap_or(DEFAULT_PORT),
        };

        let database = DatabaseConfig {
            uri: env
                .mongo_uri
                .or(file_database.uri)
                .filter(|uri| !uri.trim().is_empty()),
            name: env
                .mongo_database
                .or(file_database.name)
                .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
            op_timeout: env
                .mongo_op_timeout_secs
                .or(file_database.op_timeout_secs)
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_OP_TIMEOUT),
        };

        let cors = match env.cors_allowed_origins.or(file_cors.allowed_origins)
        {
            Some(allowed_origins) => CorsConfig { allowed_origins },
            None => CorsConfig::default(),
        };

        let store = self
            .options
            .store
            .or(env.store)
            .or(file_store)
            .unwrap_or_default();

        let config = Config {
            server,
            database,
            cors,
            store,
            dev_mode: env.dev_mode.or(file_dev_mode).unwrap_or(false),
            metadata: ConfigMetadata {
                config_path,
                env_file_loaded: false,
            },
        };

        let guard_warnings = validation::apply_guard_rails(&config)?;
        warnings.extend(guard_warnings);

        Ok((config, warnings))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Default)]
struct ConfigPathSource {
    explicit: Option<PathBuf>,
    env: Option<PathBuf>,
    default: Option<PathBuf>,
}

impl ConfigPathSource {
    fn resolved_path(&self) -> Option<(PathBuf, ConfigPathProvenance)> {
        if let Some(path) = &self.explicit {
            return Some((path.clone(), ConfigPathProvenance::Explicit));
        }
        if let Some(path) = &self.env {
            return Some((path.clone(), ConfigPathProvenance::Env));
        }
        if let Some(path) = &self.default {
            return Some((path.clone(), ConfigPathProvenance::Default));
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigPathProvenance {
    Explicit,
    Env,
    Default,
}

impl ConfigPathProvenance {
    fn is_explicit(self) -> bool {
        matches!(
            self,
            ConfigPathProvenance::Explicit | ConfigPathProvenance::Env
        )
    }
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ConfigGuardRailError;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(pairs: &[(&str, &str)]) -> EnvConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvConfig::from_lookup(|name| vars.get(name).cloned())
    }

    fn config_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let load = ConfigLoader::new()
            .with_store(StoreBackend::Memory)
            .with_config_path("/nonexistent/ignored.toml");
        // An explicit path that does not exist is an error, not a fallback.
        assert!(matches!(
            load.load_from(EnvConfig::default()),
            Err(ConfigLoadError::MissingConfig { .. })
        ));

        let file = config_file("");
        let loaded = ConfigLoader::new()
            .with_store(StoreBackend::Memory)
            .with_config_path(file.path())
            .load_from(EnvConfig::default())
            .unwrap();
        let config = loaded.config;
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.name, "Bookstore");
        assert_eq!(config.database.op_timeout, Duration::from_secs(10));
        assert!(config.cors.is_wildcard_included());
        assert_eq!(config.metadata.config_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn environment_overrides_file() {
        let file = config_file(
            r#"
            dev_mode = true

            [server]
            port = 5000
            host = "127.0.0.1"

            [database]
            uri = "mongodb://file-host:27017"
            name = "FromFile"
            op_timeout_secs = 3
            "#,
        );

        let loaded = ConfigLoader::new()
            .with_config_path(file.path())
            .load_from(env(&[
                ("SERVER_PORT", "6000"),
                ("MONGO_URI", "mongodb://env-host:27017"),
            ]))
            .unwrap();
        let config = loaded.config;

        assert_eq!(config.server.port, 6000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.database.uri.as_deref(), Some("mongodb://env-host:27017"));
        assert_eq!(config.database.name, "FromFile");
        assert_eq!(config.database.op_timeout, Duration::from_secs(3));
        assert!(config.dev_mode);
        assert_eq!(config.store, StoreBackend::Mongo);
    }

    #[test]
    fn config_path_may_come_from_environment() {
        let file = config_file("store = \"memory\"\n");
        let path = file.path().to_string_lossy().into_owned();

        let loaded = ConfigLoader::new()
            .load_from(env(&[("BOOKSTORE_CONFIG", path.as_str())]))
            .unwrap();
        assert_eq!(loaded.config.store, StoreBackend::Memory);
    }

    #[test]
    fn missing_uri_for_mongo_is_a_guard_rail_error() {
        let file = config_file("[server]\nport = 4100\n");
        let result = ConfigLoader::new()
            .with_config_path(file.path())
            .load_from(EnvConfig::default());
        assert!(matches!(
            result,
            Err(ConfigLoadError::GuardRail(ConfigGuardRailError::MissingMongoUri))
        ));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let file = config_file("[server\nport = ");
        let result = ConfigLoader::new()
            .with_config_path(file.path())
            .load_from(EnvConfig::default());
        assert!(matches!(result, Err(ConfigLoadError::Parse { .. })));
    }
}
