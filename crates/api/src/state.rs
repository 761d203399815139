use std::sync::Arc;

use verda_core::catalog::Catalog;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: verda_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Immutable rule catalogs (suggestions, achievements). Injected here
    /// rather than read from a global so tests can substitute a smaller one.
    pub catalog: Arc<Catalog>,
}
