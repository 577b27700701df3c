//! Error types for configuration resolution and database access.

/// Failure while resolving [`DatabaseConfig`](crate::config::DatabaseConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unsupported database driver: {0}")]
    UnsupportedDriver(String),

    #[error("Invalid database url: {0}")]
    InvalidUrl(#[source] sqlx::Error),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Error returned by the connection provider and the repositories.
///
/// Expected outcomes ("no matching row", "username taken") are NOT errors;
/// they are modelled in the repository return types instead.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The database could not be reached or refused the connection.
    #[error("Database unavailable: {0}")]
    Connect(#[source] sqlx::Error),

    /// A statement failed for a reason other than connectivity.
    #[error("Database query failed: {0}")]
    Query(#[source] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

impl DbError {
    /// Classify an error raised while executing a statement.
    ///
    /// Transport-level failures are reported as [`DbError::Connect`] even
    /// when they happen mid-statement.
    pub fn from_query(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => DbError::Connect(err),
            other => DbError::Query(other),
        }
    }
}
