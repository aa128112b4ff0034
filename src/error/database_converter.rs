//! Conversion of diesel errors into domain errors.
//!
//! Postgres reports unique violations through constraint names such as
//! `cars_reg_num_key`; parsing the name back into (table, column) lets the
//! API report which business key collided instead of a bare SQL message.

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::error::AppError;

pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a diesel error into an `AppError`, attaching the operation
    /// name for log context.
    pub fn convert(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::NotFound => AppError::NotFound {
                entity: "record".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                let (entity, field) = info
                    .constraint_name()
                    .and_then(Self::parse_unique_constraint)
                    .unwrap_or_else(|| ("record".to_string(), "unique key".to_string()));
                let value = info
                    .details()
                    .map(str::to_string)
                    .unwrap_or_else(|| info.message().to_string());
                AppError::Duplicate {
                    entity,
                    field,
                    value,
                }
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                AppError::BadRequest {
                    message: format!("referenced row does not exist: {}", info.message()),
                }
            }
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    /// Splits a Postgres default unique constraint name `<table>_<column>_key`
    /// into its table and column parts. The table name must not contain an
    /// underscore for the split to be unambiguous, which holds for this schema.
    fn parse_unique_constraint(name: &str) -> Option<(String, String)> {
        let stem = name.strip_suffix("_key")?;
        let (table, column) = stem.split_once('_')?;
        Some((table.to_string(), column.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestErrorInfo {
        message: String,
        constraint: Option<String>,
        details: Option<String>,
    }

    impl diesel::result::DatabaseErrorInformation for TestErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }
        fn details(&self) -> Option<&str> {
            self.details.as_deref()
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.constraint.as_deref()
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[test]
    fn parses_default_unique_constraint_name() {
        assert_eq!(
            DatabaseErrorConverter::parse_unique_constraint("cars_reg_num_key"),
            Some(("cars".to_string(), "reg_num".to_string()))
        );
        assert_eq!(
            DatabaseErrorConverter::parse_unique_constraint("no_suffix"),
            None
        );
    }

    #[test]
    fn unique_violation_becomes_duplicate() {
        let info = TestErrorInfo {
            message: "duplicate key value violates unique constraint".to_string(),
            constraint: Some("cars_reg_num_key".to_string()),
            details: Some("Key (reg_num)=(X123XX150) already exists.".to_string()),
        };
        let error = DatabaseErrorConverter::convert(
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, Box::new(info)),
            "insert car",
        );
        match error {
            AppError::Duplicate {
                entity,
                field,
                value,
            } => {
                assert_eq!(entity, "cars");
                assert_eq!(field, "reg_num");
                assert!(value.contains("X123XX150"));
            }
            other => panic!("expected Duplicate, got {other:?}"),
        }
    }

    #[test]
    fn not_found_becomes_not_found() {
        let error = DatabaseErrorConverter::convert(DieselError::NotFound, "find car");
        assert!(matches!(error, AppError::NotFound { .. }));
    }

    #[test]
    fn other_errors_keep_operation_context() {
        let error = DatabaseErrorConverter::convert(DieselError::RollbackTransaction, "update car");
        match error {
            AppError::Database { operation, .. } => assert_eq!(operation, "update car"),
            other => panic!("expected Database, got {other:?}"),
        }
    }
}
