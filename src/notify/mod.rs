//! Notification layer for announcing snapshot changes over HTTP.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Parsing the optional custom header ([`RestfulHeader`])
//! - Sending the snapshot to the configured endpoint ([`Notifier`], [`RestfulNotifier`])

mod client;
mod error;
mod header;
mod http;
mod notifier;


pub use client::ReqwestClient;
pub use error::HttpError;
pub use header::RestfulHeader;
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use notifier::{Notifier, RestfulNotifier, user_agent};
