//! CareOps API server.

use careops::app::{App, AppError};
use careops::config::AppConfig;
use careops::telemetry;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_tracing(&config.server)?;
    config.validate()?;

    let app = App::build(&config)?;
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %listener.local_addr()?,
        environment = ?config.server.environment,
        ws_path = %config.realtime.ws_path,
        "CareOps server listening"
    );

    axum::serve(listener, app.into_router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
