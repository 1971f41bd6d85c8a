//! Product repository for async database operations.
//!
//! Provides CRUD operations for the products table using diesel_async.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, DatabaseErrorConverter};
use crate::models::{NewProductRecord, Product, ProductChanges, ProductRecord};
use crate::repositories::ProductRepository;

/// Product repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct PgProductRepository {
    pool: AsyncDbPool,
}

impl PgProductRepository {
    /// Creates a new PgProductRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_by_id(&self, product_id: i64) -> Result<Option<Product>, AppError> {
        use crate::schema::products::dsl::*;
        let mut conn = self.pool.get().await?;

        products
            .filter(id.eq(product_id))
            .select(ProductRecord::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|record| record.map(Product::from))
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find product"))
    }

    /// Inserts new products; products carrying an id are upserted so the
    /// row ends up holding exactly the saved values.
    async fn save(&self, product: Product) -> Result<Product, AppError> {
        use crate::schema::products::dsl::*;
        let mut conn = self.pool.get().await?;

        let saved = match product.id {
            None => {
                diesel::insert_into(products)
                    .values(NewProductRecord::from(product))
                    .returning(ProductRecord::as_returning())
                    .get_result(&mut conn)
                    .await
            }
            Some(product_id) => {
                let changes = ProductChanges::from(&product);
                let record = ProductRecord {
                    id: product_id,
                    name: product.name,
                    price: product.price,
                    weight: product.weight,
                };
                diesel::insert_into(products)
                    .values(&record)
                    .on_conflict(id)
                    .do_update()
                    .set(&changes)
                    .returning(ProductRecord::as_returning())
                    .get_result(&mut conn)
                    .await
            }
        };

        saved
            .map(Product::from)
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "save product"))
    }

    async fn delete_by_id(&self, product_id: i64) -> Result<(), AppError> {
        use crate::schema::products::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(products.filter(id.eq(product_id)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete product"))
    }

    async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        use crate::schema::products::dsl::*;
        let mut conn = self.pool.get().await?;

        products
            .order(id.asc())
            .select(ProductRecord::as_select())
            .load(&mut conn)
            .await
            .map(|records| records.into_iter().map(Product::from).collect())
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "list products"))
    }
}
