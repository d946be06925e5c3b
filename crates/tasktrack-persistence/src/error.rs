//! Persistence Layer Error Types
//!
//! Mapped to domain errors before crossing the repository trait.

use thiserror::Error;

/// Errors that can occur during persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Write attempted for an entity that was never saved
    #[error("Entity not persisted: {0}")]
    NotPersisted(&'static str),

    /// Write attempted for an entity that already has an identity
    #[error("Entity already persisted: {entity_type} with id {id}")]
    AlreadyPersisted {
        entity_type: &'static str,
        id: String,
    },
}

impl PersistenceError {
    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }
}

/// Convert persistence errors to domain errors
impl From<PersistenceError> for tasktrack_domain::errors::DomainError {
    fn from(err: PersistenceError) -> Self {
        use tasktrack_domain::errors::DomainError;

        match err {
            PersistenceError::NotFound { entity_type, id } => DomainError::EntityNotFound {
                entity_type: entity_type.to_string(),
                id,
            },
            other => DomainError::Persistence {
                reason: other.to_string(),
            },
        }
    }
}
