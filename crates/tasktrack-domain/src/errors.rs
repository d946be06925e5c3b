//! Domain errors for TaskTrack

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {field} - {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Business rule violation: {rule}")]
    BusinessRuleViolation { rule: String },

    #[error("Entity not found: {entity_type} with id {id}")]
    EntityNotFound { entity_type: String, id: String },

    #[error("Persistence failure: {reason}")]
    Persistence { reason: String },
}

impl DomainError {
    /// Shorthand for a validation failure on a named field
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a lifecycle rule violation
    pub fn rule(rule: impl Into<String>) -> Self {
        Self::BusinessRuleViolation { rule: rule.into() }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::ValidationError { .. } => "VALIDATION_ERROR",
            DomainError::BusinessRuleViolation { .. } => "BUSINESS_RULE_VIOLATION",
            DomainError::EntityNotFound { .. } => "NOT_FOUND",
            DomainError::Persistence { .. } => "PERSISTENCE_ERROR",
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = DomainError::validation("title", "Title is required");
        assert_eq!(err.to_string(), "Validation error: title - Title is required");
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_rule_code() {
        let err = DomainError::rule("Cannot reopen a failed task");
        assert_eq!(err.code(), "BUSINESS_RULE_VIOLATION");
        assert!(err.to_string().contains("Cannot reopen"));
    }
}
