//! Interface name filtering.
//!
//! # Design
//!
//! - **Matcher**: [`NameFilter`] answers "is this interface selected?"
//! - **Decorator**: [`FilteredSource`] applies the filter transparently
//!   to any [`InterfaceSource`] implementation, so callers never see
//!   interfaces that were filtered out.

use super::{FetchError, InterfaceSource, LinkInfo};

/// Case-insensitive exact match on the interface name.
///
/// An empty filter selects every interface.
///
/// # Examples
///
/// ```
/// use ifwatch::network::filter::NameFilter;
///
/// let filter = NameFilter::new("ETH0");
/// assert!(filter.matches("eth0"));
/// assert!(!filter.matches("eth01"));
///
/// assert!(NameFilter::default().matches("anything"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameFilter {
    name: String,
}

impl NameFilter {
    /// Creates a filter selecting only the interface called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns true if this filter selects every interface.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// Returns the configured name (empty when unfiltered).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if the interface called `name` should be included.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.is_empty() || eq_ignore_case(&self.name, name)
    }
}

/// Unicode-aware case-insensitive equality.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// A fetcher decorator that drops interfaces rejected by a [`NameFilter`].
///
/// Address lookups are forwarded unchanged.
#[derive(Debug)]
pub struct FilteredSource<S> {
    inner: S,
    filter: NameFilter,
}

impl<S> FilteredSource<S> {
    /// Wraps `inner` so that only interfaces selected by `filter` are listed.
    #[must_use]
    pub const fn new(inner: S, filter: NameFilter) -> Self {
        Self { inner, filter }
    }

    /// Returns the wrapped source.
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Returns the active filter.
    #[must_use]
    pub const fn filter(&self) -> &NameFilter {
        &self.filter
    }
}

impl<S: InterfaceSource> InterfaceSource for FilteredSource<S> {
    fn links(&self) -> Result<Vec<LinkInfo>, FetchError> {
        let mut links = self.inner.links()?;
        links.retain(|link| self.filter.matches(&link.name));
        Ok(links)
    }

    fn addresses(&self, link: &LinkInfo) -> Result<Vec<String>, FetchError> {
        self.inner.addresses(link)
    }
}
