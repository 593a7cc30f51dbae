//! Infrastructure adapters for fqdn-guard.
//!
//! This crate implements the ports defined in `fqdn-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod dns;
pub mod record;
pub mod repository;

// Re-export commonly used adapters
pub use dns::{HickoryResolver, ResolverSettings, StaticResolver};
pub use record::{DomainRecord, DomainRecordReader, LoadError, load_records};
pub use repository::InMemoryRepository;
