//! Tracing subscriber initialisation.
//!
//! Only the CLI crate calls [`init_logging`]; `fqdn-core` and
//! `fqdn-adapters` only *emit* spans and events.
//!
//! # Verbosity mapping
//!
//! | Flag(s)  | Workspace crates | hickory |
//! |----------|------------------|---------|
//! | (none)   | WARN             | WARN    |
//! | `-v`     | INFO             | WARN    |
//! | `-vv`    | DEBUG            | WARN    |
//! | `-vvv`   | TRACE            | DEBUG   |
//! | `--quiet`| ERROR            | ERROR   |
//!
//! `FQDN_GUARD_LOG`, then `RUST_LOG`, override all of the above if set.
//! With `--output-format json` the log lines on stderr are JSON as well, so
//! a pipeline can parse both streams.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;
use crate::cli::global::OutputFormat;

/// Filter variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "FQDN_GUARD_LOG";

/// Initialise the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros fire. Logs go to
/// stderr so stdout stays clean for verdicts.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = env_filter(derive_level(args));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(filter);
    let result = if args.output_format == OutputFormat::Json {
        registry.with(fmt_layer.json().flatten_event(true)).try_init()
    } else {
        let use_ansi = !args.no_color && std::io::stderr().is_terminal();
        registry.with(fmt_layer.with_ansi(use_ansi)).try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

/// The first valid filter from the environment, else the flag-derived one.
fn env_filter(level: &str) -> EnvFilter {
    [LOG_ENV, "RUST_LOG"]
        .into_iter()
        .find_map(|var| EnvFilter::try_from_env(var).ok())
        .unwrap_or_else(|| EnvFilter::new(directives(level)))
}

/// Filter directives giving each workspace crate `level`.
///
/// The resolver's own events stay at WARN until `-vvv`, where query-level
/// detail becomes useful for diagnosing transient DNS failures.
fn directives(level: &str) -> String {
    let dns_level = match level {
        "trace" => "debug",
        "error" => "error",
        _ => "warn",
    };

    ["fqdn_guard", "fqdn_core", "fqdn_adapters"]
        .iter()
        .map(|target| format!("{target}={level}"))
        .chain(
            ["hickory_resolver", "hickory_proto"]
                .iter()
                .map(|target| format!("{target}={dns_level}")),
        )
        .collect::<Vec<_>>()
        .join(",")
}

/// Translate the verbosity counter + quiet flag to a level string.
fn derive_level(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
