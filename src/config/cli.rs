//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.
//! Single-dash long flags (`-interval 5`, `-restful-url=...`, `-help`) are
//! accepted as well and rewritten to their `--` form before parsing.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Long flag names that may also be spelled with a single dash.
const LONG_FLAGS: &[&str] = &[
    "output",
    "filter",
    "restful-url",
    "restful-method",
    "restful-header",
    "interval",
    "config",
    "verbose",
    "help",
    "version",
];

/// ifwatch: network interface watcher
///
/// Polls the host's network interfaces, saves the latest snapshot as JSON
/// and optionally calls a REST endpoint whenever it changes.
#[derive(Debug, Parser)]
#[command(name = "ifwatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Save the system's IP address changes to this file in JSON format [default: ip_info.json]
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Only watch the interface with this name (case-insensitive)
    #[arg(long, value_name = "NAME")]
    pub filter: Option<String>,

    /// Send the snapshot to this REST endpoint whenever it changes
    #[arg(long = "restful-url", value_name = "URL")]
    pub restful_url: Option<String>,

    /// HTTP method for the REST call [default: POST]
    #[arg(long = "restful-method", value_name = "METHOD")]
    pub restful_method: Option<String>,

    /// Extra header for the REST call, e.g. "key:value"
    #[arg(long = "restful-header", value_name = "KEY:VALUE")]
    pub restful_header: Option<String>,

    /// Seconds between checks [default: 60]
    #[arg(long, value_name = "SECONDS")]
    pub interval: Option<u64>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for ifwatch
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "ifwatch.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_long_flags(std::env::args_os()))
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::parse_from(normalize_long_flags(iter))
    }

    /// Like [`Cli::parse_from_iter`], but returns clap's error instead of exiting.
    ///
    /// # Errors
    ///
    /// Returns [`clap::Error`] for invalid arguments and for `--help`/`--version`.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(normalize_long_flags(iter))
    }
}

/// Rewrites `-name` / `-name=value` to `--name` / `--name=value` for known long flags.
///
/// The program name and everything after a bare `--` are left untouched.
pub fn normalize_long_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;

    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(position, arg)| {
            if position == 0 || passthrough {
                return arg;
            }
            if arg == "--" {
                passthrough = true;
                return arg;
            }
            match arg.to_str() {
                Some(text) if is_single_dash_long_flag(text) => OsString::from(format!("-{text}")),
                _ => arg,
            }
        })
        .collect()
}

fn is_single_dash_long_flag(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix('-') else {
        return false;
    };
    if rest.starts_with('-') {
        return false;
    }
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    LONG_FLAGS.contains(&name)
}
