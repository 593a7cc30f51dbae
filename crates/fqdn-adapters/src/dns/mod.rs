//! DNS resolver adapters.

pub mod hickory;
pub mod memory;

pub use hickory::{HickoryResolver, ResolverSettings};
pub use memory::StaticResolver;
