//! Custom error types for fluxo
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for fluxo operations
#[derive(Error, Debug)]
pub enum FluxoError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Scheduling errors (installment plans, recurrences)
    #[error("Schedule error: {0}")]
    Schedule(String),

    /// Stock level would drop below zero
    #[error("Insufficient stock for '{item}': requested {requested}, have {available}")]
    InsufficientStock {
        item: String,
        requested: i64,
        available: i64,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl FluxoError {
    /// Create a "not found" error for store transactions
    pub fn store_transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Store transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for household entries
    pub fn household_entry_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Household entry",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for stock items
    pub fn stock_item_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Stock item",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for FluxoError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FluxoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for FluxoError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for fluxo operations
pub type FluxoResult<T> = Result<T, FluxoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FluxoError::Config("missing settings".into());
        assert_eq!(err.to_string(), "Configuration error: missing settings");
    }

    #[test]
    fn test_not_found_error() {
        let err = FluxoError::stock_item_not_found("Flour 5kg");
        assert_eq!(err.to_string(), "Stock item not found: Flour 5kg");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_insufficient_stock_error() {
        let err = FluxoError::InsufficientStock {
            item: "Sugar".into(),
            requested: 10,
            available: 4,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for 'Sugar': requested 10, have 4"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let fluxo_err: FluxoError = io_err.into();
        assert!(matches!(fluxo_err, FluxoError::Io(_)));
    }
}
