//! Tasks API - REST server for task tracking

use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use domain_tasks::{InMemoryTaskRepository, PgTaskRepository, TaskService};
use eyre::eyre;
use migration::Migrator;
use tracing::info;

mod api;
mod config;
mod openapi;

use config::{Config, StorageBackend};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);
    observability::init_metrics()?;

    let db = match (config.storage, config.database.clone()) {
        (StorageBackend::Postgres, Some(database)) => {
            let db = connect_from_config_with_retry(database, config.retry.clone()).await?;
            if config.run_migrations {
                run_migrations::<Migrator>(&db, config.app.name).await?;
            }
            Some(db)
        }
        (StorageBackend::Postgres, None) => {
            return Err(eyre!("DATABASE_URL is required for the postgres backend"));
        }
        (StorageBackend::Memory, _) => {
            info!("Using in-memory task storage; tasks are lost on restart");
            None
        }
    };

    let app = match &db {
        Some(conn) => api::app_router(
            config.app,
            TaskService::new(PgTaskRepository::new(conn.clone())),
            Some(conn.clone()),
        )?,
        None => api::app_router(
            config.app,
            TaskService::new(InMemoryTaskRepository::new()),
            None,
        )?,
    };

    info!(
        storage = %config.storage,
        "Starting {} v{}", config.app.name, config.app.version
    );

    create_production_app(app, &config.server, async move {
        if let Some(db) = db {
            info!("Shutting down: closing database connections");
            match db.close().await {
                Ok(_) => info!("PostgreSQL connection closed successfully"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            }
        }
    })
    .await
    .map_err(|e| eyre!("Server error: {}", e))?;

    info!("Tasks API shutdown complete");
    Ok(())
}
