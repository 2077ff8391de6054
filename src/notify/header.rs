//! The single custom header attached to notifications.

use http::{HeaderName, HeaderValue};

/// A `key:value` header given on the command line.
///
/// Parsing is deliberately lenient: anything that is not exactly one
/// colon-separated pair of valid, non-empty parts is ignored rather than
/// reported as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestfulHeader {
    name: HeaderName,
    value: HeaderValue,
}

impl RestfulHeader {
    /// Parses `key:value`, returning `None` for anything else.
    ///
    /// Whitespace around the key and the value is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use ifwatch::notify::RestfulHeader;
    ///
    /// let header = RestfulHeader::parse("X-Token:abc123").unwrap();
    /// assert_eq!(header.name().as_str(), "x-token");
    /// assert_eq!(header.value(), "abc123");
    ///
    /// assert!(RestfulHeader::parse("noColonHere").is_none());
    /// assert!(RestfulHeader::parse("a:b:c").is_none());
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split(':');
        let (Some(name), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return None;
        };

        let (name, value) = (name.trim(), value.trim());
        if name.is_empty() || value.is_empty() {
            return None;
        }

        Some(Self {
            name: HeaderName::from_bytes(name.as_bytes()).ok()?,
            value: HeaderValue::from_str(value).ok()?,
        })
    }

    /// Returns the header name (lowercased, as HTTP/1 header names are case-insensitive).
    #[must_use]
    pub const fn name(&self) -> &HeaderName {
        &self.name
    }

    /// Returns the header value.
    #[must_use]
    pub const fn value(&self) -> &HeaderValue {
        &self.value
    }

    /// Splits the header into its name and value.
    #[must_use]
    pub fn into_parts(self) -> (HeaderName, HeaderValue) {
        (self.name, self.value)
    }
}
