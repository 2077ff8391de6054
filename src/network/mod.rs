//! Network layer for reading interface information.
//!
//! This module provides types and traits for:
//! - Representing interface metadata ([`LinkInfo`], [`InterfaceFlags`])
//! - Reading interfaces and their addresses ([`InterfaceSource`])
//! - Name filtering ([`filter`])
//! - The operating-system implementation ([`platform`])

mod fetcher;
pub mod filter;
mod link;
pub mod platform;

pub use fetcher::{FetchError, InterfaceSource};
pub use link::{InterfaceFlags, LinkInfo, format_hardware_addr};

#[cfg(test)]
pub use fetcher::mock;
