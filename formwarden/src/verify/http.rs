//! reqwest-backed transport

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::Transport;
use crate::error::TransportError;

/// Issues verification requests over HTTP.
///
/// Cheap to clone. Endpoints that are not absolute URLs are resolved
/// against the base URL, which lets configurations use paths such as
/// `/check?u=` the way a browser would.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use formwarden::HttpTransport;
///
/// let transport = HttpTransport::new()
///     .with_base_url("https://example.com")
///     .with_timeout(Duration::from_secs(5));
/// ```
#[derive(Clone)]
pub struct HttpTransport {
    inner: Arc<HttpTransportInner>,
}

#[derive(Clone)]
struct HttpTransportInner {
    client: Client,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Creates a transport with a default HTTP client.
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Creates a transport around an existing HTTP client.
    pub fn with_client(client: Client) -> Self {
        Self {
            inner: Arc::new(HttpTransportInner {
                client,
                base_url: None,
                timeout: None,
            }),
        }
    }

    /// Sets the base URL relative endpoints are resolved against.
    pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
        let mut inner = (*self.inner).clone();
        inner.base_url = Some(base_url.into());
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        let mut inner = (*self.inner).clone();
        inner.timeout = Some(timeout);
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> Option<&str> {
        self.inner.base_url.as_deref()
    }

    /// Resolves an endpoint-derived URL against the base URL.
    pub fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }
        match &self.inner.base_url {
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                url.trim_start_matches('/')
            ),
            None => url.to_string(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        let url = self.resolve(url);
        let mut request = self.inner.client.get(&url);

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.map_error(e))?;

        if response.status().is_success() {
            response.text().await.map_err(|e| self.map_error(e))
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(TransportError::http(status, body))
        }
    }
}

impl HttpTransport {
    fn map_error(&self, error: reqwest::Error) -> TransportError {
        match self.inner.timeout {
            Some(timeout) if error.is_timeout() => TransportError::Timeout(timeout),
            _ => TransportError::Network(error),
        }
    }
}
