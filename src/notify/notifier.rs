//! Snapshot notification over HTTP.

use http::header::{CONTENT_TYPE, USER_AGENT};
use http::{HeaderValue, Method};

use super::{HttpClient, HttpError, HttpRequest, HttpResponse, RestfulHeader};

/// Trait for announcing a new snapshot to an external service.
///
/// Notifications are sent once; implementations must not retry.
pub trait Notifier: Send + Sync {
    /// Sends `body` (the exact bytes of the output file).
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request could not be built or delivered.
    /// A non-2xx response is not an error; it is returned as a response.
    fn notify(
        &self,
        body: &[u8],
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}

/// Returns the `User-Agent` sent with every notification: `<os>/<arch>`.
#[must_use]
pub fn user_agent() -> String {
    format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH)
}

/// HTTP notifier posting the snapshot to a REST endpoint.
///
/// URL and method are kept as configured and only parsed when a request is
/// built, so a bad value fails that notification instead of the program.
///
/// # Example
///
/// ```
/// use ifwatch::notify::{ReqwestClient, RestfulHeader, RestfulNotifier};
///
/// let notifier = RestfulNotifier::new(ReqwestClient::new(), "https://api.example.com/ip")
///     .with_method("PUT")
///     .with_header(RestfulHeader::parse("X-Token:abc123"));
///
/// assert!(notifier.build_request(b"[]").is_ok());
/// ```
#[derive(Debug)]
pub struct RestfulNotifier<H> {
    client: H,
    url: String,
    method: String,
    header: Option<RestfulHeader>,
}

impl<H> RestfulNotifier<H> {
    /// Creates a notifier using POST and no custom header.
    #[must_use]
    pub fn new(client: H, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            method: Method::POST.to_string(),
            header: None,
        }
    }

    /// Sets the HTTP method. An empty method means GET.
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Sets the custom header, if any.
    #[must_use]
    pub fn with_header(mut self, header: Option<RestfulHeader>) -> Self {
        self.header = header;
        self
    }

    /// Returns the configured URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the configured HTTP method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn client(&self) -> &H {
        &self.client
    }

    /// Builds the notification request for `body`.
    ///
    /// The custom header is applied first, so it can never replace
    /// `Content-Type` or `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the URL is not absolute or
    /// the method is not a valid HTTP token.
    pub fn build_request(&self, body: &[u8]) -> Result<HttpRequest, HttpError> {
        let url = url::Url::parse(&self.url)
            .map_err(|e| HttpError::InvalidRequest(format!("url '{}': {e}", self.url)))?;

        let method = if self.method.is_empty() {
            Method::GET
        } else {
            Method::from_bytes(self.method.as_bytes())
                .map_err(|e| HttpError::InvalidRequest(format!("method '{}': {e}", self.method)))?
        };

        let mut request = HttpRequest::new(method, url).with_body(body.to_vec());

        if let Some(header) = &self.header {
            request = request.with_header(header.name().clone(), header.value().clone());
        }

        let agent = HeaderValue::from_str(&user_agent())
            .unwrap_or_else(|_| HeaderValue::from_static("unknown"));

        Ok(request
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .with_header(USER_AGENT, agent))
    }
}

impl<H: HttpClient> Notifier for RestfulNotifier<H> {
    async fn notify(&self, body: &[u8]) -> Result<HttpResponse, HttpError> {
        let request = self.build_request(body)?;
        self.client.request(request).await
    }
}
