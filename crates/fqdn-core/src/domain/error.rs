// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// These are definition-time failures of domain objects (a policy that cannot
/// be built, an identifier that cannot exist). Rejecting a candidate name is
/// never an error: that is a [`ValidationOutcome`](crate::domain::ValidationOutcome).
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    #[error("Invalid policy configuration: {0}")]
    InvalidPolicy(String),

    #[error("'{value}' is not a domain name string: {reason}")]
    NotADomainString { value: String, reason: String },

    // ========================================================================
    // Identity
    // ========================================================================
    #[error("Invalid record id: {0}")]
    InvalidRecordId(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidPolicy(msg) => vec![
                "Check the [policy] section of your configuration".into(),
                format!("Details: {}", msg),
            ],
            Self::NotADomainString { value, .. } => vec![
                format!("'{}' cannot be converted to an ASCII domain name", value),
                "Remove spaces, URL characters and unpaired Unicode".into(),
            ],
            Self::InvalidRecordId(_) => vec!["Record ids must not be blank".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidPolicy(_) => ErrorCategory::Configuration,
            Self::NotADomainString { .. } | Self::InvalidRecordId(_) => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
}
