//! Application layer error types
//!
//! These errors represent application-level failures suitable for API/UI
//! consumption. Domain errors map onto the same-meaning kind with their
//! message intact; only existence and ownership checks add new kinds.

use thiserror::Error;

use tasktrack_domain::errors::DomainError;

/// Application layer result type
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Application layer errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplicationError {
    // === Validation Errors ===
    /// Input validation failed
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    // === Business Rule Violations ===
    /// Lifecycle rule violation
    #[error("Business rule violation: {0}")]
    BusinessRuleViolation(String),

    // === Access Errors ===
    /// Task not found
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Task belongs to another user
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Identity could not be resolved
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    // === Infrastructure Errors ===
    /// Repository operation failed
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl ApplicationError {
    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ApplicationError::ValidationFailed(_) => "VALIDATION_ERROR",
            ApplicationError::BusinessRuleViolation(_) => "BUSINESS_RULE_VIOLATION",
            ApplicationError::TaskNotFound(_) => "NOT_FOUND",
            ApplicationError::Forbidden(_) => "FORBIDDEN",
            ApplicationError::Unauthenticated(_) => "UNAUTHENTICATED",
            ApplicationError::RepositoryError(_) => "REPOSITORY_ERROR",
        }
    }

    /// HTTP status a boundary should answer with
    pub fn http_status(&self) -> u16 {
        match self {
            ApplicationError::ValidationFailed(_) => 400,
            ApplicationError::Unauthenticated(_) => 401,
            ApplicationError::Forbidden(_) => 403,
            ApplicationError::TaskNotFound(_) => 404,
            ApplicationError::BusinessRuleViolation(_) => 422,
            ApplicationError::RepositoryError(_) => 500,
        }
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::ValidationError { field, reason } => {
                ApplicationError::ValidationFailed(format!("{}: {}", field, reason))
            }
            DomainError::BusinessRuleViolation { rule } => {
                ApplicationError::BusinessRuleViolation(rule)
            }
            DomainError::EntityNotFound { id, .. } => ApplicationError::TaskNotFound(id),
            DomainError::Persistence { reason } => ApplicationError::RepositoryError(reason),
        }
    }
}
