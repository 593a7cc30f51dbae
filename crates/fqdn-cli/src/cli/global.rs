//! Flags shared by every `fqdn-guard` subcommand.
//!
//! Flattened into [`super::Cli`] with `global = true`, so
//! `fqdn-guard evaluate shop.example.com -vv` and
//! `fqdn-guard -vv evaluate shop.example.com` mean the same thing.

use clap::Args;
use std::path::PathBuf;

/// Flags accepted before or after any subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase logging verbosity.
    ///
    /// `-v` logs each verdict, `-vv` every policy step and DNS answer,
    /// `-vvv` also the resolver's own queries. Conflicts with `--quiet`.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Increase logging verbosity (logs go to stderr):
    (none)  - Warnings only (transient DNS failures)
    -v      - Accepted / rejected names
    -vv     - Policy steps, pinned and live DNS answers
    -vvv    - Everything, including hickory resolver queries

FQDN_GUARD_LOG or RUST_LOG take precedence when set."
    )]
    pub verbose: u8,

    /// Print nothing for accepted names; rejections and errors still show
    /// and the exit code is unchanged.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes (also honours `NO_COLOR`, see
    /// <https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Configuration file; must exist unless the command is `init`.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        env = "FQDN_GUARD_CONFIG",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// `json` prints exactly one document on stdout and switches stderr
    /// logs to JSON lines.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Output format"
    )]
    pub output_format: OutputFormat,
}

/// How verdicts are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` when piped.
    #[default]
    Auto,
    /// `✓ name` / `✗ name: reason`, coloured.
    Human,
    /// Tab-separated `name  valid|invalid  reason`, for `cut` and `awk`.
    Plain,
    /// One JSON document.
    Json,
}
