//! Error response DTOs.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use crate::error::ValidationFieldError;

/// Standard error response format.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "code": "NOT_FOUND",
    "message": "Product with id 42 does not exist",
    "details": { "entity": "Product", "field": "id", "value": "42" }
}))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
    /// Correlation id echoed from the `x-request-id` header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response with code and message.
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
            request_id: None,
        }
    }

    pub fn not_found_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new(
            "NOT_FOUND",
            &format!("{entity} with {field} {value} does not exist"),
        )
        .with_details(json!({ "entity": entity, "field": field, "value": value }))
    }

    pub fn duplicate_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new(
            "DUPLICATE_ENTRY",
            &format!("{entity} with {field} '{value}' already exists"),
        )
        .with_details(json!({ "entity": entity, "field": field, "value": value }))
    }

    pub fn validation_error(field: &str, reason: &str) -> Self {
        Self::new("VALIDATION_ERROR", &format!("Validation failed for {field}"))
            .with_details(json!({ "errors": [{ "field": field, "message": reason }] }))
    }

    /// One response listing every failing field.
    pub fn validation_errors(entity: &str, errors: &[ValidationFieldError]) -> Self {
        Self::new("VALIDATION_ERROR", &format!("invalid {entity}"))
            .with_details(json!({ "errors": errors }))
    }

    /// Adds structured details to the error response.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Adds request ID to the error response for correlation.
    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error_shape() {
        let response = ErrorResponse::not_found_error("Product", "id", "7");
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["code"], "NOT_FOUND");
        assert_eq!(value["message"], "Product with id 7 does not exist");
        assert_eq!(value["details"]["value"], "7");
        assert!(value.get("request_id").is_none());
    }

    #[test]
    fn test_validation_errors_lists_fields() {
        let errors = vec![
            ValidationFieldError {
                field: "name".to_string(),
                message: "Product name must not be empty".to_string(),
            },
            ValidationFieldError {
                field: "price".to_string(),
                message: "Product price must be greater than 0".to_string(),
            },
        ];

        let value =
            serde_json::to_value(ErrorResponse::validation_errors("product", &errors)).unwrap();

        assert_eq!(value["message"], "invalid product");
        assert_eq!(value["details"]["errors"][1]["field"], "price");
    }

    #[test]
    fn test_with_request_id() {
        let response = ErrorResponse::new("BAD_REQUEST", "nope").with_request_id("abc-123");
        assert_eq!(response.request_id.as_deref(), Some("abc-123"));
        assert!(response.details.is_none());
    }
}
