use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use vs_core::{Result, ServiceConfig, Variant};

pub mod cors;
pub mod handlers;
pub mod state;

pub use cors::CorsConfig;
pub use state::AppState;

/// Builds the service for one variant. The other variant's path is never
/// mounted and answers 404.
pub fn create_app(config: &ServiceConfig, cors: &CorsConfig, state: AppState) -> Result<Router> {
    let variant = config.variant();
    let router = match variant {
        Variant::Inference => Router::new().route(variant.path(), get(handlers::inference)),
        Variant::Training => Router::new().route(variant.path(), get(handlers::training)),
    };

    Ok(router.layer(cors.layer()?).with_state(Arc::new(state)))
}

pub async fn serve(app: Router, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("🌐 Listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
