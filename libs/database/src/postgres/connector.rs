use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry_with_backoff};

/// Open a pool with explicit SeaORM options.
pub async fn connect_with_options(options: ConnectOptions) -> DatabaseResult<DatabaseConnection> {
    let db = Database::connect(options).await?;
    info!("Successfully connected to PostgreSQL database");
    Ok(db)
}

/// Open a pool from a [`PostgresConfig`] with a single attempt.
pub async fn connect_from_config(config: PostgresConfig) -> DatabaseResult<DatabaseConnection> {
    info!(url = %config.redacted_url(), "Connecting to PostgreSQL");
    connect_with_options(config.into_connect_options()).await
}

/// Open a pool, retrying with exponential backoff.
///
/// Covers the common startup race where the API comes up before the
/// database accepts connections.
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: RetryConfig,
) -> DatabaseResult<DatabaseConnection> {
    info!(
        url = %config.redacted_url(),
        max_retries = retry_config.max_retries,
        "Connecting to PostgreSQL"
    );
    let options = config.into_connect_options();

    retry_with_backoff(|| connect_with_options(options.clone()), &retry_config)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed {
            attempts: retry_config.max_retries + 1,
            message: e.to_string(),
        })
}

/// Apply every pending migration of `M`.
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> DatabaseResult<()> {
    info!("Running {} database migrations...", app_name);
    M::up(db, None)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;
    info!("Migrations completed successfully for {}", app_name);
    Ok(())
}
