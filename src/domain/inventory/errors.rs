//! Inventory-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ProductId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    #[error("Insufficient stock: {available} available, {requested} requested")]
    InsufficientStock { available: u32, requested: u32 },

    #[error("SKU already in use: {0}")]
    DuplicateSku(String),

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl InventoryError {
    pub fn code(&self) -> ErrorCode {
        match self {
            InventoryError::NotFound(_) => ErrorCode::ProductNotFound,
            InventoryError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            InventoryError::DuplicateSku(_) => ErrorCode::DuplicateSku,
            InventoryError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            InventoryError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }
}

impl From<ValidationError> for InventoryError {
    fn from(err: ValidationError) -> Self {
        InventoryError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for InventoryError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DuplicateSku => InventoryError::DuplicateSku(
                err.details.get("sku").cloned().unwrap_or(err.message),
            ),
            _ => InventoryError::Infrastructure(err.to_string()),
        }
    }
}
