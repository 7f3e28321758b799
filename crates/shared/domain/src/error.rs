//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, gRPC, storage).

use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed for a field or input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Password-related errors
    #[error("Password error: {0}")]
    Password(String),

    /// Identifier outside the fixed catalog (role, module, action, status)
    #[error("Unknown {kind}: {value}")]
    UnknownIdentifier { kind: &'static str, value: String },

    /// Internal domain error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create a password error
    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }

    /// Create an unknown-identifier error
    pub fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        DomainError::UnknownIdentifier {
            kind,
            value: value.into(),
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Reject a required text field that is empty or whitespace only.
pub(crate) fn require_filled(field: &'static str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Trimmed replacement for a required field; `None` leaves the field alone.
pub(crate) fn filled_patch(field: &'static str, value: Option<String>) -> DomainResult<Option<String>> {
    match value {
        Some(value) => {
            require_filled(field, &value)?;
            Ok(Some(value.trim().to_string()))
        }
        None => Ok(None),
    }
}
