//! Application layer for fqdn-guard.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (policy, uniqueness, entity)
//! - **Ports**: Interface definitions (traits) for DNS and record lookups
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! validation rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    DomainPolicyValidator, EntityVerdict, FqdnConstraint, FqdnEntityValidator, UniquenessChecker,
    Violation, evaluate,
};

// Re-export port traits (for adapter implementation)
pub use ports::{DnsResolver, IdentityReader, Repository, Resolution};

pub use error::ApplicationError;
