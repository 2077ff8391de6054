//! Configuration layer for ifwatch.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`WatchConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! An empty `restful-url` (from either source) disables notifications, and an
//! empty `filter` watches every interface.
//!
//! # Lenient Options
//!
//! `restful-header` is never a configuration error: anything other than a
//! single valid `key:value` pair is dropped.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{Cli, Command, normalize_long_flags};
pub use error::ConfigError;
pub use toml::{TomlConfig, default_config_template};
pub use validated::{RestfulTarget, WatchConfig, write_default_config};
