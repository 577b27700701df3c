use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};

use crate::config::DatabaseConfig;
use crate::error::DbError;

/// A connection checked out of the provider. Returned to the pool on drop,
/// on every exit path.
pub type DbConnection = PoolConnection<Postgres>;

/// Hands out scoped database connections.
///
/// Cheap to clone; clones share the underlying pool. No connection is opened
/// until the first [`acquire`](Self::acquire).
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    pool: PgPool,
}

impl ConnectionProvider {
    /// Build a provider from resolved configuration.
    ///
    /// Fails only on configuration problems; connectivity is checked lazily.
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &DatabaseConfig) -> Result<Self, DbError> {
        let options = config.connect_options()?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .connect_lazy_with(options);

        Ok(Self { pool })
    }

    /// Wrap an existing pool (used by `#[sqlx::test]` fixtures).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn acquire(&self) -> Result<DbConnection, DbError> {
        self.pool.acquire().await.map_err(DbError::Connect)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close every connection and refuse further acquires.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
