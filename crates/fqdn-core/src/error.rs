//! Unified error handling for fqdn-core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions. A rejected candidate is not an
//! error; see [`ValidationOutcome`](crate::domain::ValidationOutcome).

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for fqdn-core operations.
#[derive(Debug, Error, Clone)]
pub enum FqdnError {
    /// Errors from the domain layer (bad policy, bad identifiers).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (collaborators, constraint setup).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl FqdnError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Run `fqdn-guard config list` to see the effective settings".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in fqdn-guard".into(),
                "Please report it together with the command you ran".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Check if this error is retryable.
    ///
    /// DNS that gave no definitive answer may answer on the next attempt;
    /// nothing else changes by retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(ApplicationError::DnsUnavailable { .. })
                | Self::Application(ApplicationError::StoreLockError)
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Unavailable,
    Internal,
}

/// Convenient result type alias.
pub type FqdnResult<T> = Result<T, FqdnError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> FqdnResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> FqdnResult<T> {
        self.map_err(|e| FqdnError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}
