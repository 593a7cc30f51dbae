//! fqdn-core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for validating the
//! custom domain names tenants attach to a hosted catalog, following
//! hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           fqdn-cli (fqdn-guard)         │
//! │        (Composition root, output)       │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (DomainPolicyValidator, Uniqueness,    │
//! │        FqdnEntityValidator)             │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (DnsResolver, Repository, IdentityReader)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      fqdn-adapters (Infrastructure)     │
//! │ (HickoryResolver, InMemoryRepository)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (SyntaxValidator, PolicyConfig, Outcome)│
//! │         No I/O                          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fqdn_core::prelude::*;
//!
//! // 1. Syntax only
//! assert!(SyntaxValidator::is_valid_fqdn("shop.example.com"));
//!
//! // 2. Policy (with an injected resolver adapter)
//! let policy = Arc::new(PolicyConfig::new("catalog.example.net", "example.com", ["www"])?);
//! let validator = DomainPolicyValidator::new(policy, resolver);
//! let outcome = validator.evaluate("shop.example.com")?;
//! ```

// Domain layer (pure validation rules)
pub mod domain;

// Application layer (orchestration logic)
pub mod application;

// Error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        DomainPolicyValidator, EntityVerdict, FqdnConstraint, FqdnEntityValidator,
        UniquenessChecker, Violation, evaluate,
        ports::{DnsResolver, IdentityReader, Repository, Resolution},
    };
    pub use crate::domain::{
        FieldValue, Matches, NOT_UNIQUE_ERROR, NormalizedName, ObjectRef, PolicyConfig, RecordId,
        SyntaxValidator, Uniqueness, ValidationOutcome, ViolationKind,
    };
    pub use crate::error::{FqdnError, FqdnResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
