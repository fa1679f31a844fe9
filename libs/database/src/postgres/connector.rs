use super::PostgresConfig;
use sea_orm::{Database, DatabaseConnection, DbErr};
use tracing::info;

/// Establish a PostgreSQL connection pool from configuration.
///
/// A single attempt, no retry policy: a store that is unreachable at startup
/// surfaces immediately as an error.
pub async fn connect(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    let host = config.host.clone();
    let database = config.database.clone();

    let db = Database::connect(config.into_connect_options()).await?;

    info!(host = %host, database = %database, "Connected to PostgreSQL");
    Ok(db)
}
