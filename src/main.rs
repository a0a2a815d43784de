use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use xliff_converter::config::Config;
use xliff_converter::handler::ConversionHandler;
use xliff_converter::xliff::XliffGenerator;
use xliff_converter::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("xliff_converter=info".parse()?),
        )
        .init();

    info!(
        "Starting XLIFF converter v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration from environment
    let config = Config::from_env()?;
    info!("Storage directory: {}", config.storage_dir.display());
    if config.internal_errors_as_server_errors {
        info!("Internal errors are reported as 500");
    }

    let handler = ConversionHandler::new(Arc::new(XliffGenerator::new()), &config.storage_dir)
        .with_internal_errors_as_server_errors(config.internal_errors_as_server_errors);
    let app = build_router(AppState::new(handler), config.max_upload_bytes());

    let address = config.listen_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
