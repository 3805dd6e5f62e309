use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vidhook_core::{
    load_config, load_config_from_env, validate_config, Acquirer, Dispatcher, HttpAcquirer,
    Ingestor, ProcessDispatcher,
};
use vidhook_server::api::create_router;
use vidhook_server::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting vidhook {}", VERSION);

    // Config file is optional; env vars and PORT apply either way
    let config = match std::env::var("VIDHOOK_CONFIG").map(PathBuf::from) {
        Ok(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))?
        }
        Err(_) => load_config_from_env().context("Failed to load config from environment")?,
    };

    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Input root: {:?}", config.storage.input_root);
    info!(
        "Transcoder: {:?} {:?}",
        config.transcoder.program, config.transcoder.args
    );

    let acquirer: Arc<dyn Acquirer> = Arc::new(
        HttpAcquirer::new(config.acquirer.clone()).context("Failed to create HTTP client")?,
    );
    let dispatcher: Arc<dyn Dispatcher> =
        Arc::new(ProcessDispatcher::new(config.transcoder.clone()));

    let ingestor = Ingestor::from_config(&config, acquirer, dispatcher);

    // Requests retry directory creation, so a failure here is not fatal
    if let Err(e) = ingestor.store().ensure_root().await {
        warn!("Could not create input root: {}", e);
    }

    let addr = SocketAddr::new(config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, ingestor));
    let app = create_router(state);

    info!("Starting server on {}", addr);
    info!("Webhook endpoints:");
    for endpoint in ["short-form", "long-form", "listings"] {
        info!("  POST /webhook/video-upload/{}", endpoint);
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
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

    info!("Shutdown signal received");
}
