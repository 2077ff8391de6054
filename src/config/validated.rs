//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction,
//! and the result is never mutated afterwards.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::network::filter::NameFilter;
use crate::notify::RestfulHeader;

use super::cli::Cli;
use super::defaults;
use super::error::ConfigError;
use super::toml::TomlConfig;

/// Where and how change notifications are sent.
///
/// URL and method are kept as given; a value that cannot form a request
/// fails each notification (logged) without stopping the watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestfulTarget {
    /// Endpoint URL
    pub url: String,

    /// HTTP method
    pub method: String,

    /// Optional custom header; malformed input has already been dropped
    pub header: Option<RestfulHeader>,
}

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`WatchConfig::from_raw`] to create from CLI args and optional TOML config.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Path of the snapshot file
    pub output: PathBuf,

    /// Interface name filter
    pub filter: NameFilter,

    /// Notification target; `None` disables notifications
    pub restful: Option<RestfulTarget>,

    /// Time between checks
    pub interval: Duration,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for WatchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filter = if self.filter.is_empty() {
            "none"
        } else {
            self.filter.name()
        };

        write!(
            f,
            "Config {{ output: {}, filter: {}, interval: {}s, ",
            self.output.display(),
            filter,
            self.interval.as_secs(),
        )?;

        // Header values may carry credentials; only report presence
        match &self.restful {
            Some(target) => write!(
                f,
                "restful: {} {} (header: {}) }}",
                target.method,
                target.url,
                if target.header.is_some() { "set" } else { "none" },
            ),
            None => write!(f, "restful: disabled }}"),
        }
    }
}

impl WatchConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is zero.
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let output = Self::resolve_output(cli, toml);
        let filter = Self::resolve_filter(cli, toml);
        let restful = Self::resolve_restful(cli, toml);
        let interval = Self::resolve_interval(cli, toml)?;

        Ok(Self {
            output,
            filter,
            restful,
            interval,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_output(cli: &Cli, toml: Option<&TomlConfig>) -> PathBuf {
        // Priority: CLI explicit > TOML > default
        cli.output.clone().unwrap_or_else(|| {
            PathBuf::from(
                toml.and_then(|t| t.output.path.as_deref())
                    .unwrap_or(defaults::OUTPUT),
            )
        })
    }

    fn resolve_filter(cli: &Cli, toml: Option<&TomlConfig>) -> NameFilter {
        let name = cli
            .filter
            .as_deref()
            .or_else(|| toml.and_then(|t| t.filter.name.as_deref()))
            .unwrap_or_default();

        NameFilter::new(name)
    }

    fn resolve_restful(cli: &Cli, toml: Option<&TomlConfig>) -> Option<RestfulTarget> {
        let section = toml.map(|t| &t.restful);

        let url_str = cli
            .restful_url
            .as_deref()
            .or_else(|| section.and_then(|s| s.url.as_deref()))
            .unwrap_or_default();

        // An empty URL disables notifications entirely
        if url_str.is_empty() {
            return None;
        }

        let method = cli
            .restful_method
            .as_deref()
            .or_else(|| section.and_then(|s| s.method.as_deref()))
            .unwrap_or(defaults::METHOD);

        let header = cli
            .restful_header
            .as_deref()
            .or_else(|| section.and_then(|s| s.header.as_deref()))
            .and_then(RestfulHeader::parse);

        Some(RestfulTarget {
            url: url_str.to_string(),
            method: method.to_string(),
            header,
        })
    }

    fn resolve_interval(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .interval
            .or_else(|| toml.and_then(|t| t.monitor.interval))
            .unwrap_or(defaults::INTERVAL_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "interval",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
