//! Product service for business logic operations.
//!
//! Enforces field validation and existence checks around the
//! `ProductRepository` collaborator. Repository failures are passed through
//! untouched.

use std::sync::Arc;

use tracing::{debug, warn};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::Product;
use crate::repositories::ProductRepository;

/// Product service for handling product-related business logic.
///
/// Cloning is cheap: the repository is shared behind an `Arc`.
#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    /// Creates a new ProductService with the given repository.
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    /// Creates a new product.
    ///
    /// # Returns
    /// Exactly what the repository's `save` returns
    ///
    /// # Errors
    /// `ValidationErrors` when the name is empty or price/weight are not
    /// positive; nothing is written in that case.
    pub async fn create_product(&self, product: Product) -> AppResult<Product> {
        if let Err(errors) = product.validate() {
            warn!(name = %product.name, price = product.price, weight = product.weight, "Rejected invalid product");
            return Err(AppError::from_validation("product", errors));
        }

        let saved = self.repo.save(product).await?;
        debug!(id = ?saved.id, "Product created");
        Ok(saved)
    }

    /// Merges `product` into the stored product with the given id.
    ///
    /// See [`Product::merge`] for which fields are taken over.
    pub async fn update_product(&self, id: i64, product: Product) -> AppResult<Product> {
        let existing = self.get_product_by_id(id).await?;
        let merged = existing.merge(product).with_id(id);

        let saved = self.repo.save(merged).await?;
        debug!(id, "Product updated");
        Ok(saved)
    }

    /// Deletes the product with the given id.
    pub async fn delete_product(&self, id: i64) -> AppResult<()> {
        self.get_product_by_id(id).await?;
        self.repo.delete_by_id(id).await?;
        debug!(id, "Product deleted");
        Ok(())
    }

    /// Gets a product by its id.
    ///
    /// # Returns
    /// The product if found, or `NotFound` ("Product with id {id} does not exist")
    pub async fn get_product_by_id(&self, id: i64) -> AppResult<Product> {
        match self.repo.find_by_id(id).await? {
            Some(product) => Ok(product),
            None => {
                warn!(id, "Product not found");
                Err(AppError::product_not_found(id))
            }
        }
    }

    /// Lists all products in repository order.
    pub async fn get_all_products(&self) -> AppResult<Vec<Product>> {
        self.repo.find_all().await
    }
}
