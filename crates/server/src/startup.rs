use std::future::Future;

use axum::Router;
use common::admin_http::spawn_admin_server;
use configs::{AppConfig, DatabaseConfig};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::metrics;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect and bring the schema up to date.
pub async fn prepare_database(cfg: &DatabaseConfig) -> Result<DatabaseConnection, StartupError> {
    let db = models::db::connect_with_config(cfg)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    info!(event = "migrations_applied", "database schema up to date");
    Ok(db)
}

/// Application router over a migrated database.
pub fn build_app(db: DatabaseConnection) -> Router {
    routes::build_router(AppState::new(db), build_cors())
}

/// Migrate, then serve until `shutdown` resolves and in-flight requests finish.
pub async fn run_with_config<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let db = prepare_database(&cfg.database).await?;

    // /healthz + /metrics on their own listener
    if let Some(port) = cfg.server.admin_port {
        let admin_addr = format!("{}:{}", cfg.server.host, port);
        spawn_admin_server(&admin_addr, metrics::encode_metrics);
    }

    let app = build_app(db);
    let addr = cfg.server.bind_addr();
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!(event = "server_drained", "http server stopped");
    Ok(())
}
