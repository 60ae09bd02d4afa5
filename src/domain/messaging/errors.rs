//! Messaging-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, LeadId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagingError {
    #[error("Lead not found: {0}")]
    CustomerNotFound(LeadId),

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl MessagingError {
    pub fn code(&self) -> ErrorCode {
        match self {
            MessagingError::CustomerNotFound(_) => ErrorCode::LeadNotFound,
            MessagingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MessagingError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }
}

impl From<ValidationError> for MessagingError {
    fn from(err: ValidationError) -> Self {
        MessagingError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for MessagingError {
    fn from(err: DomainError) -> Self {
        MessagingError::Infrastructure(err.to_string())
    }
}
