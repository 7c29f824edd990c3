use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{RetryConfig, retry_with_backoff};

/// Open the pool, retrying while the server is unreachable.
/// `None` uses [`RetryConfig::default`].
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    let options = config.into_connect_options();

    let db = retry_with_backoff(
        || Database::connect(options.clone()),
        retry_config.unwrap_or_default(),
    )
    .await?;

    info!("Connected to PostgreSQL");
    Ok(db)
}

/// Apply every pending migration of `M`.
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!(app = app_name, "Applying database migrations");
    M::up(db, None).await?;
    info!(app = app_name, "Database schema is up to date");
    Ok(())
}
