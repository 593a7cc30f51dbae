//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to answer the three
//! questions a host asks: may this name be used, is it already taken, and
//! does this record pass both.

pub mod entity_service;
pub mod policy_service;
pub mod uniqueness_service;

pub use entity_service::{EntityVerdict, FqdnConstraint, FqdnEntityValidator, Violation};
pub use policy_service::{DomainPolicyValidator, evaluate};
pub use uniqueness_service::UniquenessChecker;
