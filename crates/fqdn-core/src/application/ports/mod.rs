//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `fqdn-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `DnsResolver`: host to address lookup
//!   - `Repository`: find records by field value
//!   - `IdentityReader`: read fields and identity off a host record
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{DnsResolver, IdentityReader, Repository, Resolution};

#[cfg(test)]
pub use output::{MockDnsResolver, MockRepository};
