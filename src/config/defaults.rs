//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default path of the snapshot file.
pub const OUTPUT: &str = "ip_info.json";

/// Default HTTP method for REST notifications.
pub const METHOD: &str = "POST";

/// Default polling interval in seconds.
pub const INTERVAL_SECS: u64 = 60;

/// Default polling interval as Duration.
#[must_use]
pub const fn interval() -> Duration {
    Duration::from_secs(INTERVAL_SECS)
}
