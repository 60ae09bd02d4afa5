//! Lead-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, LeadId, ValidationError};

/// Lead-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadError {
    /// Lead was not found.
    NotFound(LeadId),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl LeadError {
    pub fn not_found(id: LeadId) -> Self {
        LeadError::NotFound(id)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        LeadError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        LeadError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            LeadError::NotFound(_) => ErrorCode::LeadNotFound,
            LeadError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            LeadError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            LeadError::NotFound(id) => format!("Lead not found: {}", id),
            LeadError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            LeadError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for LeadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for LeadError {}

impl From<ValidationError> for LeadError {
    fn from(err: ValidationError) -> Self {
        LeadError::validation(err.field(), err.to_string())
    }
}

impl From<DomainError> for LeadError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => LeadError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => LeadError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_has_lead_code() {
        assert_eq!(LeadError::not_found(LeadId::new()).code(), ErrorCode::LeadNotFound);
    }

    #[test]
    fn storage_error_becomes_infrastructure() {
        let err: LeadError = DomainError::new(ErrorCode::StorageError, "disk gone").into();
        assert!(matches!(err, LeadError::Infrastructure(_)));
    }

    #[test]
    fn validation_error_keeps_field() {
        let err: LeadError = ValidationError::empty_field("name").into();
        assert_eq!(
            err,
            LeadError::validation("name", "Field 'name' cannot be empty")
        );
    }
}
