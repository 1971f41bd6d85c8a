//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::db::AsyncDbPool;
use crate::repositories::{InMemoryProductRepository, PgProductRepository, ProductRepository};
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since both Services and AsyncDbPool use Arc internally.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Connection pool, present only for the PostgreSQL backend
    pub db_pool: Option<AsyncDbPool>,
}

impl AppState {
    /// Creates state backed by PostgreSQL.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::with_pool(pool);
    /// ```
    pub fn with_pool(pool: AsyncDbPool) -> Self {
        let repo: Arc<dyn ProductRepository> = Arc::new(PgProductRepository::new(pool.clone()));
        Self {
            services: Services::new(repo),
            db_pool: Some(pool),
        }
    }

    /// Creates state backed by an in-memory repository.
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryProductRepository::new()))
    }

    /// Creates state on top of an arbitrary product repository.
    pub fn with_repository(repo: Arc<dyn ProductRepository>) -> Self {
        Self {
            services: Services::new(repo),
            db_pool: None,
        }
    }
}
