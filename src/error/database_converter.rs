use crate::error::AppError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Utility for converting database errors to structured AppError variants.
///
/// Constraint names follow the PostgreSQL defaults (`{table}_{column}_check`,
/// `{table}_pkey`, `{table}_{column}_key`), which is how the bundled
/// migrations declare them.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.message(), info.constraint_name(), operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        message: &str,
        constraint_name: Option<&str>,
        operation: &str,
    ) -> AppError {
        let parsed = constraint_name.and_then(Self::parse_constraint_name);

        match (kind, parsed) {
            (DatabaseErrorKind::UniqueViolation, Some((entity, field))) => AppError::Duplicate {
                entity,
                field,
                value: Self::extract_key_value(message).unwrap_or_else(|| "duplicate_value".to_string()),
            },
            (DatabaseErrorKind::CheckViolation, Some((entity, field))) => AppError::Validation {
                field,
                reason: format!("Check constraint failed for {} field", entity),
            },
            (DatabaseErrorKind::NotNullViolation, Some((entity, field))) => AppError::Validation {
                field,
                reason: format!("Field is required for {}", entity),
            },
            _ => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!("Database error: {}", message)),
            },
        }
    }

    /// Splits a constraint name into (entity, field).
    ///
    /// `products_price_check` -> ("products", "price"), `products_pkey` -> ("products", "id").
    pub fn parse_constraint_name(constraint: &str) -> Option<(String, String)> {
        if let Some(table) = constraint.strip_suffix("_pkey") {
            return (!table.is_empty()).then(|| (table.to_string(), "id".to_string()));
        }

        let stem = ["_check", "_key", "_not_null"]
            .iter()
            .find_map(|suffix| constraint.strip_suffix(suffix))?;
        let (table, column) = stem.split_once('_')?;
        if table.is_empty() || column.is_empty() {
            return None;
        }
        Some((table.to_string(), column.to_string()))
    }

    /// Extracts the value from a "Key (field)=(value)" detail line.
    fn extract_key_value(message: &str) -> Option<String> {
        let start = message.find(")=(")? + 3;
        let end = message[start..].find(')')? + start;
        Some(message[start..end].to_string())
    }
}
