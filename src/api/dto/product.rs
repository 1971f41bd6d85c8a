//! Product DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;
use crate::models::Product;

/// Request body for creating or updating a product.
///
/// Omitted fields default to empty/zero. On update those values leave the
/// stored field unchanged; on create they fail product validation.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
#[schema(example = json!({
    "name": "Desk lamp",
    "price": 24.99,
    "weight": 1.2
}))]
pub struct ProductRequest {
    /// Product name (at most 255 characters)
    #[serde(default)]
    #[validate(length(max = 255, message = "Product name must be at most 255 characters"))]
    pub name: String,

    /// Unit price
    #[serde(default)]
    pub price: f64,

    /// Weight in kilograms
    #[serde(default)]
    pub weight: f64,
}

impl ProductRequest {
    /// Converts the request into a transient product without an id.
    pub fn into_product(self) -> Product {
        Product::new(self.name, self.price, self.weight)
    }
}

/// Product returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "name": "Desk lamp",
    "price": 24.99,
    "weight": 1.2
}))]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub weight: f64,
}

impl TryFrom<Product> for ProductResponse {
    type Error = AppError;

    /// Fails with `Internal` for a product without an id; persisted products
    /// always carry one.
    fn try_from(product: Product) -> Result<Self, Self::Error> {
        let Some(id) = product.id else {
            return Err(AppError::Internal {
                source: anyhow::anyhow!("persisted product '{}' has no id", product.name),
            });
        };

        Ok(Self {
            id,
            name: product.name,
            price: product.price,
            weight: product.weight,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_request_defaults_missing_fields() {
        let request: ProductRequest = serde_json::from_str(r#"{"price": 12.5}"#).unwrap();
        assert_eq!(request.name, "");
        assert_eq!(request.price, 12.5);
        assert_eq!(request.weight, 0.0);
    }

    #[test]
    fn test_overlong_name_fails_validation() {
        let request = ProductRequest {
            name: "x".repeat(256),
            price: 1.0,
            weight: 1.0,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_into_product_has_no_id() {
        let product = ProductRequest {
            name: "Mug".to_string(),
            price: 8.0,
            weight: 0.3,
        }
        .into_product();

        assert_eq!(product, Product::new("Mug", 8.0, 0.3));
    }

    #[test]
    fn test_response_from_product() {
        let response = ProductResponse::try_from(Product::new("Mug", 8.0, 0.3).with_id(4)).unwrap();
        assert_eq!(response.id, 4);
        assert_eq!(response.name, "Mug");
    }

    #[test]
    fn test_response_from_product_without_id_is_internal_error() {
        let result = ProductResponse::try_from(Product::new("Mug", 8.0, 0.3));
        assert!(matches!(result, Err(AppError::Internal { .. })));
    }
}
