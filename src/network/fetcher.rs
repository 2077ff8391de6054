//! Interface enumeration trait and error types.

use std::io;

use thiserror::Error;

use super::LinkInfo;

/// Error type for interface enumeration operations.
///
/// Describes what went wrong without dictating recovery strategy.
/// Callers decide how to handle each error variant.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Reading the addresses bound to an interface failed.
    #[error("Failed to read addresses of '{interface}': {source}")]
    AddressRead {
        /// Name of the interface whose addresses could not be read.
        interface: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Platform-specific error with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

/// Trait for reading network interfaces from the operating system.
///
/// Enumeration and address lookup are separate calls so that a failure
/// reading one interface's addresses stays local to that interface.
///
/// # Example
///
/// ```ignore
/// use ifwatch::network::{FetchError, InterfaceSource, LinkInfo};
///
/// struct Fixed(Vec<LinkInfo>);
///
/// impl InterfaceSource for Fixed {
///     fn links(&self) -> Result<Vec<LinkInfo>, FetchError> {
///         Ok(self.0.clone())
///     }
///
///     fn addresses(&self, _link: &LinkInfo) -> Result<Vec<String>, FetchError> {
///         Ok(vec![])
///     }
/// }
/// ```
pub trait InterfaceSource: Send + Sync {
    /// Lists every interface exposed by the operating system.
    ///
    /// Implementations return ALL interfaces; filtering is done by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the interface list cannot be read at all.
    fn links(&self) -> Result<Vec<LinkInfo>, FetchError>;

    /// Reads the addresses bound to `link`, in CIDR notation and OS order.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the addresses of this interface cannot be read.
    fn addresses(&self, link: &LinkInfo) -> Result<Vec<String>, FetchError>;
}

/// Mock interface source for testing.
///
/// Enumeration results are queued; once the queue is drained the source
/// keeps returning its steady-state links. Address lookups are keyed by
/// interface name, and a lookup can be scripted to fail.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// A mock implementation of [`InterfaceSource`] for testing.
    #[derive(Debug, Default)]
    pub struct MockSource {
        queued: Mutex<VecDeque<Result<Vec<LinkInfo>, FetchError>>>,
        steady: Vec<LinkInfo>,
        addresses: HashMap<String, Vec<String>>,
        failing: Vec<String>,
        link_calls: AtomicUsize,
        address_calls: AtomicUsize,
    }

    impl MockSource {
        /// Creates a source that always reports `links`.
        #[must_use]
        pub fn steady(links: Vec<LinkInfo>) -> Self {
            Self {
                steady: links,
                ..Self::default()
            }
        }

        /// Queues an enumeration result returned before the steady state.
        #[must_use]
        pub fn then(self, result: Result<Vec<LinkInfo>, FetchError>) -> Self {
            self.queued.lock().unwrap().push_back(result);
            self
        }

        /// Sets the addresses reported for the named interface.
        #[must_use]
        pub fn with_addresses(mut self, name: &str, addrs: &[&str]) -> Self {
            self.addresses.insert(
                name.to_string(),
                addrs.iter().map(ToString::to_string).collect(),
            );
            self
        }

        /// Makes address lookup fail for the named interface.
        #[must_use]
        pub fn failing_addresses(mut self, name: &str) -> Self {
            self.failing.push(name.to_string());
            self
        }

        /// Number of `links()` calls so far.
        pub fn link_calls(&self) -> usize {
            self.link_calls.load(Ordering::SeqCst)
        }

        /// Number of `addresses()` calls so far.
        pub fn address_calls(&self) -> usize {
            self.address_calls.load(Ordering::SeqCst)
        }
    }

    impl InterfaceSource for MockSource {
        fn links(&self) -> Result<Vec<LinkInfo>, FetchError> {
            self.link_calls.fetch_add(1, Ordering::SeqCst);
            self.queued
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(self.steady.clone()))
        }

        fn addresses(&self, link: &LinkInfo) -> Result<Vec<String>, FetchError> {
            self.address_calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.contains(&link.name) {
                return Err(FetchError::AddressRead {
                    interface: link.name.clone(),
                    source: io::Error::other("mock address failure"),
                });
            }
            Ok(self.addresses.get(&link.name).cloned().unwrap_or_default())
        }
    }
}
