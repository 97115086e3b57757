use std::net::SocketAddr;

use anyhow::Context;
use dotenvy::dotenv;
use snippets::logging::{init_tracing, shutdown_tracer};
use snippets::metrics::{init_metrics, metrics_app};
use snippets::router::init_router;
use snippets::state::AppState;
use snippets_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
use snippets_db::{init_db_pool, run_migrations};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let server_config = ServerConfig::from_env()?;
    init_tracing(&server_config.log_dir)?;

    if let Some(handle) = init_metrics(server_config.observability_enabled)? {
        let metrics_addr = SocketAddr::new(server_config.host, server_config.metrics_port);
        let listener = tokio::net::TcpListener::bind(metrics_addr)
            .await
            .with_context(|| format!("Failed to bind metrics listener on {metrics_addr}"))?;
        info!(address = %metrics_addr, "Metrics endpoint listening");

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                error!(error = %e, "Metrics server stopped");
            }
        });
    }

    let database_config = DatabaseConfig::from_env()?;
    let db = init_db_pool(&database_config)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&db)
        .await
        .context("Failed to run database migrations")?;

    let state = AppState::new(db, JwtConfig::from_env()?, CorsConfig::from_env());
    let app = init_router(state);

    let addr = SocketAddr::new(server_config.host, server_config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(address = %addr, "Server running");
    info!("Swagger UI available at http://{addr}/swagger-ui");
    info!("Scalar UI available at http://{addr}/scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tracer();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
