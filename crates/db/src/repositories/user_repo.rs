//! Repository for the `users` table.

use async_trait::async_trait;

use crate::connection::ConnectionProvider;
use crate::error::DbError;
use crate::models::user::{NewUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password, created_at";

/// Result of a registration attempt that reached the database.
#[derive(Debug)]
pub enum RegisterOutcome {
    /// The row was inserted; carries the database-assigned id.
    Inserted(User),
    /// The unique constraint on `username` rejected the insert.
    AlreadyExists,
}

/// User persistence as seen by the request handlers.
///
/// Both operations return `Err` only for infrastructure failures. "Username
/// taken" and "no such credentials" are ordinary results.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user. A duplicate username yields
    /// [`RegisterOutcome::AlreadyExists`].
    async fn register(&self, input: &NewUser) -> Result<RegisterOutcome, DbError>;

    /// Find the user whose username AND password both match exactly.
    async fn validate(&self, username: &str, password: &str) -> Result<Option<User>, DbError>;
}

/// [`UserStore`] backed by PostgreSQL.
///
/// Every call acquires its own connection and returns it before the call
/// completes, whether it succeeds or fails.
#[derive(Debug, Clone)]
pub struct UserRepo {
    db: ConnectionProvider,
}

impl UserRepo {
    pub fn new(db: ConnectionProvider) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for UserRepo {
    async fn register(&self, input: &NewUser) -> Result<RegisterOutcome, DbError> {
        let query = format!(
            "INSERT INTO users (username, password)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let mut conn = self.db.acquire().await?;
        let result = sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.password)
            .fetch_one(&mut *conn)
            .await;

        match result {
            Ok(user) => Ok(RegisterOutcome::Inserted(user)),
            Err(e) => classify_insert_error(e),
        }
    }

    async fn validate(&self, username: &str, password: &str) -> Result<Option<User>, DbError> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE username = $1 AND password = $2
             ORDER BY id
             LIMIT 1"
        );
        let mut conn = self.db.acquire().await?;
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .bind(password)
            .fetch_optional(&mut *conn)
            .await
            .map_err(DbError::from_query)
    }
}

/// Map an insert failure: unique violations (SQLSTATE 23505) are an expected
/// outcome, everything else propagates.
fn classify_insert_error(err: sqlx::Error) -> Result<RegisterOutcome, DbError> {
    if is_unique_violation(&err) {
        Ok(RegisterOutcome::AlreadyExists)
    } else {
        Err(DbError::from_query(err))
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
