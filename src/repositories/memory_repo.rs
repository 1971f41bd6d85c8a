//! In-memory product repository.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::{AppError, AppResult};
use crate::models::Product;
use crate::repositories::ProductRepository;

/// Product repository backed by a concurrent map.
///
/// Ids are handed out from a monotonically increasing sequence starting at 1.
/// Saving a product with an explicit id bumps the sequence past it so later
/// inserts never collide.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<DashMap<i64, Product>>,
    sequence: Arc<AtomicI64>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn next_id(&self) -> AppResult<i64> {
        self.sequence
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| current.checked_add(1))
            .map(|previous| previous + 1)
            .map_err(|_| AppError::Internal {
                source: anyhow::anyhow!("product id sequence exhausted"),
            })
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>> {
        Ok(self.products.get(&id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, mut product: Product) -> AppResult<Product> {
        let id = match product.id {
            Some(id) => {
                self.sequence.fetch_max(id, Ordering::SeqCst);
                id
            }
            None => self.next_id()?,
        };
        product.id = Some(id);
        self.products.insert(id, product.clone());
        Ok(product)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        self.products.remove(&id);
        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<Product>> {
        let mut products: Vec<Product> = self
            .products
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        products.sort_by_key(|p| p.id);
        Ok(products)
    }
}
