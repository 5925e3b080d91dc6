// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{env, net::SocketAddr};

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use webfinger_server::{
    api::router,
    config::{ConfigError, ServerSettings, SiteConfig, DEFAULT_LOG_FILTER, LOG_FORMAT_ENV},
    generator,
    state::AppState,
    store::{InMemoryStore, StoreError},
    webfinger::AccountStore,
};

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to parse bind address {0}")]
    BindAddress(String),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        error!(error = %e, "WebFinger server failed");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    if env::var(LOG_FORMAT_ENV).is_ok_and(|format| format == "json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn run() -> Result<(), StartupError> {
    let settings = ServerSettings::from_env()?;
    let config = SiteConfig::from_env()?;
    let store = InMemoryStore::from_file(&settings.authors_file)?;
    info!(
        accounts = store.len(),
        path = %settings.authors_file.display(),
        "Loaded author data"
    );

    generator::generate(&config, &store, &settings.output_dir);

    let state = AppState::new(config, store)?;
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port)
        .parse()
        .map_err(|_| StartupError::BindAddress(format!("{}:{}", settings.host, settings.port)))?;

    let listener = TcpListener::bind(addr).await?;
    info!("WebFinger server listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("WebFinger server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
