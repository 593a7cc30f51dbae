//! Command handlers.
//!
//! Each handler translates arguments into core calls and prints the
//! results; adapters are wired here and nowhere else.

use std::sync::Arc;

use tracing::debug;

use fqdn_adapters::{HickoryResolver, StaticResolver};
use fqdn_core::application::ports::{DnsResolver, Resolution};

use crate::{cli::ResolverArgs, config::AppConfig, error::CliResult};

pub mod check;
pub mod completions;
pub mod config;
pub mod evaluate;
pub mod init;
pub mod validate;

/// Build the resolver for `evaluate` / `validate`.
///
/// Pinned answers always win; live DNS answers the rest unless `--offline`.
pub(crate) fn build_resolver(
    args: &ResolverArgs,
    config: &AppConfig,
) -> CliResult<Box<dyn DnsResolver>> {
    let mut resolver = StaticResolver::new();

    if args.offline {
        debug!("Live DNS disabled");
    } else {
        let live = HickoryResolver::new(config.resolver_settings())?;
        resolver = resolver.with_fallback(Arc::new(live));
    }

    for pinned in &args.resolve {
        resolver.pin(pinned.host.as_str(), Resolution::Resolved(pinned.ip))?;
    }
    debug!(pinned = resolver.len(), "Resolver ready");

    Ok(Box::new(resolver))
}
