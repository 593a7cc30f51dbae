// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for fqdn-guard.
//!
//! This module contains pure validation logic. DNS lookups and record
//! storage are reached only through ports (traits) defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No network, filesystem or store access
//! - **Immutable values**: names, policies and outcomes are Clone + PartialEq
//! - **Rejections are values**: invalid input yields an outcome, not an error
//!
// Public API - what the world sees
pub mod describe;
pub mod error;
pub mod outcome;
pub mod policy;
pub mod syntax;
pub mod value_objects;

// Re-exports for convenience
pub use error::{DomainError, ErrorCategory};
pub use outcome::{
    MESSAGE_ALREADY_USED, NOT_UNIQUE_ERROR, Uniqueness, ValidationOutcome, ViolationKind,
};
pub use policy::PolicyConfig;
pub use syntax::{MESSAGE_FQDN_INVALID, SyntaxRule, SyntaxValidator, SyntaxViolation};
pub use value_objects::{FieldValue, Matches, NormalizedName, ObjectRef, RecordId};

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Cross-module properties
    // ========================================================================

    #[test]
    fn every_character_outside_the_allowed_set_is_rejected() {
        for c in ['_', '*', '!', '$', '~', '+', '=', ','] {
            let candidate = format!("sh{c}op.example.com");
            assert!(
                !SyntaxValidator::is_valid_fqdn(&candidate),
                "{candidate:?} should be rejected"
            );
        }
    }

    #[test]
    fn normalization_then_syntax_agree_with_direct_check() {
        for candidate in ["shop.example.com", "SHOP.example.com", "bücher.de", "a.b"] {
            let name = NormalizedName::parse(candidate).unwrap();
            assert_eq!(
                SyntaxValidator::check(&name).is_ok(),
                SyntaxValidator::is_valid_fqdn(candidate)
            );
        }
    }

    #[test]
    fn policy_suffix_is_a_valid_fqdn_in_practice() {
        let policy = PolicyConfig::new("catalog.example.net", "example.com", ["www"]).unwrap();
        assert!(SyntaxValidator::check(policy.catalog_domain_suffix()).is_ok());
    }

    #[test]
    fn violation_keys_are_unique() {
        let kinds = [
            ViolationKind::FqdnInvalid,
            ViolationKind::NotADomainString,
            ViolationKind::PlaceDomainPrefix,
            ViolationKind::ExceededSubdomainLevel,
            ViolationKind::NameReserved,
            ViolationKind::DomainNotFound,
            ViolationKind::CatalogDomainNotFound,
            ViolationKind::CatalogCnameMismatch,
            ViolationKind::Conflict,
        ];
        let keys: std::collections::HashSet<_> = kinds.iter().map(|k| k.key()).collect();
        assert_eq!(keys.len(), kinds.len());
    }
}
