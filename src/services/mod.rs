//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod product_service;

pub use product_service::ProductService;

use std::sync::Arc;

use crate::repositories::ProductRepository;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
#[derive(Clone)]
pub struct Services {
    pub products: ProductService,
}

impl Services {
    /// Creates a new Services instance on top of a product repository.
    pub fn new(product_repo: Arc<dyn ProductRepository>) -> Self {
        Self {
            products: ProductService::new(product_repo),
        }
    }
}
