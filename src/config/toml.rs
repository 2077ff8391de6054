//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Snapshot output section
    #[serde(default)]
    pub output: OutputSection,

    /// Interface name filter section
    #[serde(default)]
    pub filter: FilterSection,

    /// REST notification section
    #[serde(default)]
    pub restful: RestfulSection,

    /// Polling section
    #[serde(default)]
    pub monitor: MonitorSection,
}

/// Snapshot output section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Path of the snapshot file
    pub path: Option<String>,
}

/// Interface name filter section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSection {
    /// Interface name to watch (case-insensitive); empty = all
    pub name: Option<String>,
}

/// REST notification section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RestfulSection {
    /// Endpoint URL; empty disables notifications
    pub url: Option<String>,

    /// HTTP method (default: POST)
    pub method: Option<String>,

    /// Single "key:value" header
    pub header: Option<String>,
}

/// Polling section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    /// Seconds between checks
    pub interval: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# ifwatch configuration file
# Command-line flags override the values below.

[output]
# Path of the JSON snapshot (default: ip_info.json)
path = "ip_info.json"

[filter]
# Only watch the interface with this name, compared case-insensitively.
# Empty or absent = watch every interface.
# name = "eth0"

[restful]
# Endpoint called with the snapshot as JSON body whenever it changes.
# Empty or absent = no notifications.
# url = "https://api.example.com/ip"

# HTTP method (default: POST)
# method = "POST"

# One extra header as "key:value". Anything else is ignored.
# header = "X-Token:abc123"

[monitor]
# Seconds between checks (default: 60)
interval = 60
"#
    .to_string()
}
