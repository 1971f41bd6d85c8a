//! Product CRUD request handlers.
//!
//! Thin adapters from HTTP to [`ProductService`](crate::services::ProductService).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::PRODUCT_TAG;
use crate::api::dto::{ErrorResponse, ProductRequest, ProductResponse};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates product-related routes.
///
/// Routes:
/// - GET /        - List all products
/// - POST /       - Create a new product
/// - GET /{id}    - Get product by ID
/// - PUT /{id}    - Update product by ID
/// - DELETE /{id} - Delete product by ID
pub fn product_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_products, create_product))
        .routes(routes!(get_product, update_product, delete_product))
}

/// GET /api/products - List all products
#[utoipa::path(
    get,
    path = "/",
    tag = PRODUCT_TAG,
    responses(
        (status = 200, description = "All products ordered by id", body = Vec<ProductResponse>)
    )
)]
async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<ProductResponse>>> {
    let products = state.services.products.get_all_products().await?;
    let products = products
        .into_iter()
        .map(ProductResponse::try_from)
        .collect::<AppResult<Vec<_>>>()?;
    Ok(Json(products))
}

/// POST /api/products - Create product
///
/// Returns 201 Created with the stored product and its assigned id.
#[utoipa::path(
    post,
    path = "/",
    tag = PRODUCT_TAG,
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid product", body = ErrorResponse)
    )
)]
async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ProductRequest>,
) -> AppResult<(StatusCode, Json<ProductResponse>)> {
    let product = state
        .services
        .products
        .create_product(payload.into_product())
        .await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::try_from(product)?)))
}

/// GET /api/products/{id} - Get product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = PRODUCT_TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.services.products.get_product_by_id(id).await?;
    Ok(Json(ProductResponse::try_from(product)?))
}

/// PUT /api/products/{id} - Update product
///
/// Only a non-empty name and positive price or weight replace stored values.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = PRODUCT_TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<ProductRequest>,
) -> AppResult<Json<ProductResponse>> {
    let product = state
        .services
        .products
        .update_product(id, payload.into_product())
        .await?;
    Ok(Json(ProductResponse::try_from(product)?))
}

/// DELETE /api/products/{id} - Delete product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = PRODUCT_TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.products.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
