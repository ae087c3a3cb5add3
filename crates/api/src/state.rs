use std::sync::Arc;

use library_storage::ObjectStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: library_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Upload target. `None` when no bucket is configured.
    pub storage: Option<Arc<dyn ObjectStore>>,
}
