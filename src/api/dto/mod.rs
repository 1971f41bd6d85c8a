//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `product` - Product request/response DTOs
//! - `health` - Health check DTOs
//! - `error` - Common error response DTOs

mod error;
mod health;
mod product;

pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use product::{ProductRequest, ProductResponse};
