//! # SOAP Transport
//!
//! The [`Transport`] trait delivers one request envelope to a network location and hands
//! back the raw response payload. The client treats every failure as opaque and forwards it
//! to the caller untouched.
//!
//! [`HttpTransport`] is the default implementation: it POSTs the envelope with `reqwest`.
use crate::BoxError;
use http::{
    HeaderMap, HeaderValue,
    header::{ACCEPT, USER_AGENT},
};
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = concat!("soapc/", env!("CARGO_PKG_VERSION"));
const DEFAULT_ACCEPT: &str = "text/xml,application/soap+xml,application/xml;q=0.9,*/*;q=0.8";

/// Per-request options the transport honours.
///
/// A client carries a base set of options. The active security extension may adjust a copy
/// of them for each request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportOptions {
    /// Upper bound for the whole exchange.
    pub timeout: Option<Duration>,
}

/// An opaque failure reported by a [`Transport`].
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(#[source] BoxError);

impl TransportError {
    pub fn new(err: impl Into<BoxError>) -> Self {
        Self(err.into())
    }

    /// The underlying error reported by the transport.
    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.0.as_ref()
    }
}

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Sends `envelope` to `location` and returns the raw response body.
    async fn request(
        &self,
        location: &str,
        envelope: String,
        headers: HeaderMap,
        options: &TransportOptions,
    ) -> Result<String, TransportError>;
}

/// Sends envelopes as HTTP POST requests.
///
/// The response body is returned whatever the HTTP status is: servers report SOAP faults
/// with a `500` and the fault must still reach the decoder.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an existing, pre-configured `reqwest` client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        location: &str,
        envelope: String,
        mut headers: HeaderMap,
        options: &TransportOptions,
    ) -> Result<String, TransportError> {
        headers
            .entry(USER_AGENT)
            .or_insert(HeaderValue::from_static(DEFAULT_USER_AGENT));
        headers
            .entry(ACCEPT)
            .or_insert(HeaderValue::from_static(DEFAULT_ACCEPT));

        let mut request = self.client.post(location).headers(headers).body(envelope);
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(TransportError::new)?;
        let status = response.status();
        tracing::debug!(location, %status, "received HTTP response");

        response.text().await.map_err(TransportError::new)
    }
}
