//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No validation logic lives here.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use fqdn_core::domain::NormalizedName;

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "fqdn-guard",
    bin_name = "fqdn-guard",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Validate custom domain names for a hosted catalog",
    long_about = "fqdn-guard checks FQDN syntax, applies the catalog domain policy \
                  (reserved names, subdomain depth, DNS pointing at the catalog) \
                  and detects names already used by another record.",
    after_help = "EXAMPLES:\n\
        \x20 fqdn-guard check shop.example.com 'bad_name.example.com'\n\
        \x20 fqdn-guard evaluate shop.example.com\n\
        \x20 fqdn-guard evaluate shop.example.com --offline --resolve shop.example.com=203.0.113.10\n\
        \x20 fqdn-guard validate shop.example.com --records tenants.json --id 42",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check FQDN syntax only (no DNS, no policy).
    #[command(
        about = "Check FQDN syntax",
        after_help = "EXAMPLES:\n\
            \x20 fqdn-guard check shop.example.com\n\
            \x20 fqdn-guard check bücher.example.com --output-format json"
    )]
    Check(CheckArgs),

    /// Apply the catalog domain policy.
    #[command(
        visible_alias = "eval",
        about = "Evaluate names against the domain policy",
        after_help = "EXAMPLES:\n\
            \x20 fqdn-guard evaluate shop.example.com\n\
            \x20 fqdn-guard evaluate a.example.com b.example.com --resolve a.example.com=203.0.113.10"
    )]
    Evaluate(EvaluateArgs),

    /// Policy plus uniqueness against a records file.
    #[command(
        about = "Validate a name for a record",
        after_help = "EXAMPLES:\n\
            \x20 fqdn-guard validate shop.example.com --records tenants.json\n\
            \x20 fqdn-guard validate shop.example.com --records tenants.json --id 42 --error-path catalog"
    )]
    Validate(ValidateArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 fqdn-guard init            # default location\n\
            \x20 fqdn-guard init --force    # overwrite\n\
            \x20 fqdn-guard -c ./guard.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 fqdn-guard completions bash > ~/.local/share/bash-completion/completions/fqdn-guard\n\
            \x20 fqdn-guard completions zsh  > ~/.zfunc/_fqdn-guard\n\
            \x20 fqdn-guard completions fish > ~/.config/fish/completions/fqdn-guard.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 fqdn-guard config get policy.catalog_domain_suffix\n\
            \x20 fqdn-guard config list\n\
            \x20 fqdn-guard config path"
    )]
    Config(ConfigCommands),
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `fqdn-guard check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Names to check.
    #[arg(value_name = "NAME", required = true, help = "Domain names to check")]
    pub names: Vec<String>,
}

// ── evaluate ──────────────────────────────────────────────────────────────────

/// Arguments for `fqdn-guard evaluate`.
#[derive(Debug, Args)]
pub struct EvaluateArgs {
    /// Names to evaluate.
    #[arg(value_name = "NAME", required = true, help = "Domain names to evaluate")]
    pub names: Vec<String>,

    #[command(flatten)]
    pub resolver: ResolverArgs,
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `fqdn-guard validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Name to assign to the record.
    #[arg(value_name = "NAME", help = "Domain name to assign")]
    pub name: String,

    /// JSON array of the records already stored.
    #[arg(
        short = 'r',
        long = "records",
        value_name = "FILE",
        help = "Records file (JSON array)"
    )]
    pub records: PathBuf,

    /// Identity of the record being updated; omit for a new record.
    #[arg(long = "id", value_name = "ID", help = "Id of the record being updated")]
    pub id: Option<String>,

    /// Field holding the domain name.
    #[arg(
        long = "field",
        value_name = "FIELD",
        default_value = "fqdn",
        help = "Record field holding the name"
    )]
    pub field: String,

    /// Where uniqueness conflicts are reported; defaults to the field.
    #[arg(
        long = "error-path",
        value_name = "PATH",
        help = "Path reported for uniqueness conflicts"
    )]
    pub error_path: Option<String>,

    #[command(flatten)]
    pub resolver: ResolverArgs,
}

// ── resolver flags ────────────────────────────────────────────────────────────

/// DNS flags shared by `evaluate` and `validate`.
#[derive(Debug, Args)]
pub struct ResolverArgs {
    /// Pin a DNS answer, e.g. `shop.example.com=203.0.113.10`.
    #[arg(
        long = "resolve",
        value_name = "HOST=IP",
        value_parser = parse_resolve_override,
        help = "Pin a DNS answer (repeatable)"
    )]
    pub resolve: Vec<ResolveOverride>,

    /// Never query live DNS; hosts without a pinned answer are not found.
    #[arg(long = "offline", help = "Disable live DNS lookups")]
    pub offline: bool,
}

/// One `--resolve HOST=IP` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOverride {
    pub host: NormalizedName,
    pub ip: IpAddr,
}

fn parse_resolve_override(value: &str) -> Result<ResolveOverride, String> {
    let (host, ip) = value
        .split_once('=')
        .ok_or_else(|| format!("expected HOST=IP, got '{value}'"))?;

    let host = NormalizedName::parse(host.trim()).map_err(|e| e.to_string())?;
    let ip = ip
        .trim()
        .parse::<IpAddr>()
        .map_err(|e| format!("invalid address '{ip}': {e}"))?;

    Ok(ResolveOverride { host, ip })
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `fqdn-guard init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `fqdn-guard completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `fqdn-guard config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `policy.catalog_cname`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
