use anyhow::{Context, Result, anyhow};
use bookstore_config::{Config, StoreBackend};
use bookstore_core::{application::AppUnitOfWork, database::StoreClient};
use tracing::{info, warn};

use super::app_state::AppState;

/// Connect the configured store and assemble the shared state. A store that
/// cannot be reached is fatal.
pub async fn build_state(config: Config) -> Result<AppState> {
    let unit_of_work = match config.store {
        StoreBackend::Mongo => {
            let uri = config
                .database
                .uri
                .as_deref()
                .ok_or_else(|| anyhow!("MONGO_URI is not configured"))?;
            let client = StoreClient::connect(
                uri,
                &config.database.name,
                config.database.op_timeout,
            )
            .await
            .context("failed to connect to MongoDB")?;
            AppUnitOfWork::from_client(client)
        }
        StoreBackend::Memory => {
            warn!("using the in-memory store; data will not survive restarts");
            AppUnitOfWork::in_memory()
        }
    };

    info!(store = %config.store, "catalog store ready");
    Ok(AppState::new(unit_of_work, config))
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        ) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_core::database::BookStore;

    #[tokio::test]
    async fn memory_backend_needs_no_uri() {
        let config = Config {
            store: StoreBackend::Memory,
            ..Config::default()
        };
        let state = build_state(config).await.unwrap();
        state.unit_of_work().store.ping().await.unwrap();
    }

    #[tokio::test]
    async fn mongo_backend_without_uri_fails() {
        let err = build_state(Config::default()).await.unwrap_err();
        assert!(err.to_string().contains("MONGO_URI"));
    }
}
