use sea_orm::{DatabaseConnection, DbErr};

/// Ping the database, for readiness probes.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.ping().await
}
