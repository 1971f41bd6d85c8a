//! HTTP API for the product catalog.
//!
//! Handlers translate requests into [`ProductService`](crate::services::ProductService)
//! calls; middleware adds request ids, request logging and the JSON error
//! shape. The OpenAPI document is generated from the handler annotations.

mod doc;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use routes::create_router;
