use std::path::PathBuf;

use anyhow::Context;
use bookstore_config::{ConfigLoad, ConfigLoader, StoreBackend};
use bookstore_server::{
    create_app,
    infra::startup::{build_state, shutdown_signal},
};
use clap::{Args as ClapArgs, Parser};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "bookstore-server")]
#[command(about = "REST API for managing a bookstore's book inventory")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long, env = "BOOKSTORE_CONFIG")]
    config: Option<PathBuf>,

    /// Path to a .env file to load before reading the environment
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Storage backend (overrides config)
    #[arg(long, value_enum, env = "BOOKSTORE_STORE")]
    store: Option<StoreBackend>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_server(cli.serve).await
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = args.config.clone() {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = args.env_file.clone() {
        loader = loader.with_env_file(path);
    }
    if let Some(store) = args.store {
        loader = loader.with_store(store);
    }

    let ConfigLoad {
        mut config,
        warnings,
    } = loader.load().context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = config.metadata.config_path.as_ref() {
        info!(path = %path.display(), "using configuration file");
    }

    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => {
                warn!(message = %warning.message, "configuration warning")
            }
        }
    }

    let bind_address = config.server.bind_address();
    let state = build_state(config).await?;
    let router = create_app(state);

    info!("Starting bookstore API on {}", bind_address);
    let listener = tokio::net::TcpListener::bind(bind_address.as_str())
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}
