use axum::Router;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::adapters::HttpVenueDirectory;
use crate::app::routes;
use crate::core::quote::QuoteService;
use crate::core::ConfigProvider;
use crate::utils::error::Result;

/// Wires the HTTP venue directory into the router and serves until shutdown.
pub async fn run<C: ConfigProvider>(config: &C) -> Result<()> {
    let directory = HttpVenueDirectory::new(
        config.venue_service_url(),
        Duration::from_secs(config.request_timeout_secs()),
    )?;
    let router = routes::router(
        QuoteService::new(directory),
        config.delivery_price_route(),
        config.environment(),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port()));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(
        "Server running at port {} in {} mode.",
        config.port(),
        config.environment()
    );
    tracing::info!("DOPC endpoint: {}", config.delivery_price_route());
    tracing::debug!("Venue directory: {}", config.venue_service_url());

    serve(listener, router).await
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<()> {
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("SIGINT signal received."),
        _ = terminate => tracing::info!("SIGTERM signal received."),
    }
}
