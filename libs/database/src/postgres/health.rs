use crate::common::{DatabaseError, DatabaseResult};
use sea_orm::DatabaseConnection;

/// Ping the database; used by the readiness endpoint
pub async fn check_health(db: &DatabaseConnection) -> DatabaseResult<()> {
    db.ping()
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))
}
