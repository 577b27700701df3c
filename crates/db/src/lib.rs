//! Database access for the task manager: configuration, connections, and repositories.

pub mod config;
pub mod error;
pub mod models;
pub mod repositories;

mod connection;

pub use connection::{ConnectionProvider, DbConnection};
pub use error::{ConfigError, DbError};

/// Run `SELECT 1` on a freshly acquired connection.
pub async fn health_check(db: &ConnectionProvider) -> Result<(), DbError> {
    let mut conn = db.acquire().await?;
    sqlx::query("SELECT 1")
        .execute(&mut *conn)
        .await
        .map_err(DbError::from_query)?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(db: &ConnectionProvider) -> Result<(), DbError> {
    sqlx::migrate!("../../db/migrations").run(db.pool()).await?;
    Ok(())
}
