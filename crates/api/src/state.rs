use std::sync::Arc;

use taskmanager_db::repositories::UserStore;
use taskmanager_db::ConnectionProvider;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Scoped connection source, used directly by the health check.
    pub db: ConnectionProvider,
    /// User registration and credential validation.
    pub users: Arc<dyn UserStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
