//! Unified error types for the domain layer
//!
//! Provides a common error type that can be used across all domain
//! operations, enabling consistent error handling without forcing callers
//! to match on Strings.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// State transition not allowed
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    /// Retry budget for a trial is spent
    #[error("Attempts exhausted: {0}")]
    AttemptsExhausted(String),

    /// A bounded collection is at capacity
    #[error("Container full: {current}/{max} items")]
    ContainerFull { current: usize, max: usize },
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// Use this when domain invariants or constraints are violated:
    /// - Required fields are empty or missing
    /// - Values are outside allowed ranges
    /// - Business rules are not satisfied
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Create an invalid state transition error
    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidStateTransition(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = DomainError::not_found("Quest", "first_harvest");
        assert_eq!(
            err.to_string(),
            "Entity not found: Quest with id first_harvest"
        );
    }

    #[test]
    fn test_validation_helper() {
        let err = DomainError::validation("trust delta out of range");
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
