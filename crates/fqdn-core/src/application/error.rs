//! Application layer errors.
//!
//! These errors represent failures in orchestration or in the collaborators
//! behind the ports, never a rejected candidate. Rejections are
//! [`ValidationOutcome`](crate::domain::ValidationOutcome) values.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The resolver could not give a definitive answer (timeout, network).
    #[error("DNS lookup for '{host}' did not complete: {reason}")]
    DnsUnavailable { host: String, reason: String },

    /// The repository behind the uniqueness check failed.
    #[error("Repository lookup failed: {reason}")]
    RepositoryUnavailable { reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Record store error")]
    StoreLockError,

    /// The constraint names a field the record type does not map.
    #[error("The field '{field}' is not mapped, so it cannot be validated")]
    FieldNotMapped { field: String },

    /// The constrained field holds something other than a string.
    #[error("Field '{field}' must hold a string, found {found}")]
    UnexpectedFieldType { field: String, found: &'static str },

    /// The constraint itself is malformed.
    #[error("Invalid constraint definition: {0}")]
    ConstraintDefinition(String),
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DnsUnavailable { host, .. } => vec![
                format!("Could not get an answer for {}", host),
                "Check network connectivity and the system resolver".into(),
                "Try again in a moment, or raise dns.timeout_ms".into(),
            ],
            Self::RepositoryUnavailable { reason } => vec![
                format!("Lookup failed: {}", reason),
                "Check that the records source is readable".into(),
            ],
            Self::StoreLockError => vec![
                "The record store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::FieldNotMapped { field } => vec![
                format!("Records have no field named '{}'", field),
                "Check the --field option or the record schema".into(),
            ],
            Self::UnexpectedFieldType { field, .. } => vec![
                format!("Store a hostname string in '{}'", field),
            ],
            Self::ConstraintDefinition(_) => {
                vec!["This is a configuration error in the validator setup".into()]
            }
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DnsUnavailable { .. } | Self::RepositoryUnavailable { .. } => {
                ErrorCategory::Unavailable
            }
            Self::StoreLockError => ErrorCategory::Internal,
            Self::FieldNotMapped { .. }
            | Self::UnexpectedFieldType { .. }
            | Self::ConstraintDefinition(_) => ErrorCategory::Configuration,
        }
    }
}
