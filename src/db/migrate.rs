//! Embedded migrations and startup schema bootstrap.
//!
//! Migrations are compiled into the binary and applied on startup. Applied
//! migrations are tracked in `__diesel_schema_migrations`, so re-running on
//! an already-bootstrapped database is a no-op.

use diesel_migrations::{embed_migrations, EmbeddedMigrations};

use crate::error::{AppError, AppResult};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Applies all pending migrations over a blocking libpq connection.
///
/// diesel_migrations drives a synchronous connection, so the work runs on
/// the blocking thread pool.
pub async fn run_pending_migrations(database_url: &str) -> AppResult<Vec<String>> {
    let database_url = database_url.to_string();

    tokio::task::spawn_blocking(move || {
        use diesel::pg::PgConnection;
        use diesel::Connection;
        use diesel_migrations::MigrationHarness;

        let mut conn = PgConnection::establish(&database_url).map_err(|e| AppError::Database {
            operation: "establish connection for migrations".to_string(),
            source: anyhow::anyhow!("Connection error: {}", e),
        })?;

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| AppError::Database {
                operation: "run pending migrations".to_string(),
                source: anyhow::anyhow!("Migration error: {}", e),
            })?;

        Ok::<_, AppError>(applied.iter().map(|m| m.to_string()).collect())
    })
    .await
    .map_err(|e| AppError::Internal {
        source: anyhow::Error::from(e),
    })?
}
