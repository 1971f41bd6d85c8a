//! Repository layer for data access operations.
//!
//! `ProductRepository` is the persistence seam the service layer depends on.
//! Two implementations ship with the crate: a PostgreSQL one built on
//! diesel_async and an in-memory one for tests and database-less runs.

mod memory_repo;
mod product_repo;

pub use memory_repo::InMemoryProductRepository;
pub use product_repo::PgProductRepository;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::Product;

/// Data-access capability for products.
///
/// Absence is always reported as `Ok(None)`; an `Err` means the storage
/// itself failed.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Finds a product by its id.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>>;

    /// Persists a product, assigning an id when it has none.
    ///
    /// # Returns
    /// The stored product, always with `id = Some(_)`
    async fn save(&self, product: Product) -> AppResult<Product>;

    /// Deletes the product with the given id.
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;

    /// Lists every stored product.
    async fn find_all(&self) -> AppResult<Vec<Product>>;
}
