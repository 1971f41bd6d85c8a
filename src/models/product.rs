use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Catalog product.
///
/// `id` is `None` until the repository persists the product; every product
/// handed back by a repository carries an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate, Default)]
pub struct Product {
    pub id: Option<i64>,
    #[validate(length(min = 1, message = "Product name must not be empty"))]
    pub name: String,
    #[validate(range(exclusive_min = 0.0, message = "Product price must be greater than 0"))]
    pub price: f64,
    #[validate(range(exclusive_min = 0.0, message = "Product weight must be greater than 0"))]
    pub weight: f64,
}

impl Product {
    /// Creates a transient (not yet persisted) product.
    pub fn new(name: impl Into<String>, price: f64, weight: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            weight,
        }
    }

    /// Returns the same product carrying the given id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Merges the usable fields of `changes` into this product.
    ///
    /// A non-empty name and a positive price or weight replace the current
    /// value; anything else is ignored. The id is never taken from `changes`.
    pub fn merge(mut self, changes: Product) -> Self {
        if !changes.name.is_empty() {
            self.name = changes.name;
        }
        if changes.price > 0.0 {
            self.price = changes.price;
        }
        if changes.weight > 0.0 {
            self.weight = changes.weight;
        }
        self
    }
}

/// Product row as stored in the `products` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRecord {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub weight: f64,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: Some(record.id),
            name: record.name,
            price: record.price,
            weight: record.weight,
        }
    }
}

/// Insert model for products that do not have an id yet.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProductRecord {
    pub name: String,
    pub price: f64,
    pub weight: f64,
}

/// Column values written when an existing row is saved again.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct ProductChanges {
    pub name: String,
    pub price: f64,
    pub weight: f64,
}

impl From<&Product> for ProductChanges {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price,
            weight: product.weight,
        }
    }
}

impl From<Product> for NewProductRecord {
    fn from(product: Product) -> Self {
        Self {
            name: product.name,
            price: product.price,
            weight: product.weight,
        }
    }
}
