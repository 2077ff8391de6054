//! ifwatch: network interface watcher
//!
//! A library for polling the host's network interfaces, persisting the
//! latest snapshot as JSON and announcing changes to a REST endpoint.

pub mod config;
pub mod network;
pub mod notify;
pub mod output;
pub mod snapshot;
pub mod watcher;
