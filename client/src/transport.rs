use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use log::warn;
use reqwest::{Client, StatusCode, header::HeaderMap};
use thiserror::Error;

/// A fully prepared POST request, ready to be handed to a [`Transport`].
///
/// The same value is sent again on every retry, so it owns its body bytes.
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    /// Absolute URL of the endpoint
    pub url: String,
    /// Headers to attach, including authentication
    pub headers: HeaderMap,
    /// Encoded JSON body
    pub body: Vec<u8>,
}

/// What came back from the server once an exchange completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    /// HTTP status code
    pub status: u16,
    /// Raw body text
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the server answered with `200 OK`.
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK.as_u16()
    }
}

/// Failures below the HTTP status line.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request could not be sent or no response arrived (connect, timeout, ...).
    #[error("request error: {0}")]
    Request(#[source] reqwest::Error),
    /// The request could not be built locally (malformed URL, bad header, ...).
    #[error("error creating request: {0}")]
    Build(#[source] reqwest::Error),
    /// A connection-level failure reported by a non-reqwest transport.
    #[error("connection error: {0}")]
    Connection(String),
    /// The server answered but its body could not be read.
    #[error("error reading response body: {0}")]
    Body(#[source] reqwest::Error),
}

impl TransportError {
    /// Only failures that happened before a response was reached are worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransportError::Request(_) | TransportError::Connection(_))
    }
}

/// The capability the client needs from an HTTP stack.
///
/// [`HttpTransport`] is the production implementation; tests and embedders
/// can provide their own.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one POST request and returns the status and body once the exchange completes.
    async fn post(&self, request: &OutgoingRequest) -> Result<HttpReply, TransportError>;
}

/// [`Transport`] backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds a transport whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl From<Client> for HttpTransport {
    fn from(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn post(&self, request: &OutgoingRequest) -> Result<HttpReply, TransportError> {
        (**self).post(request).await
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, request: &OutgoingRequest) -> Result<HttpReply, TransportError> {
        let response = self
            .client
            .post(&request.url)
            .headers(request.headers.clone())
            .body(request.body.clone())
            .send()
            .await
            .map_err(|err| {
                if err.is_builder() {
                    TransportError::Build(err)
                } else {
                    TransportError::Request(err)
                }
            })?;

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            // The status alone is enough to report a failed call.
            Err(err) if status != StatusCode::OK => {
                warn!("Could not read body of {status} response: {err}");
                String::new()
            }
            Err(err) => return Err(TransportError::Body(err)),
        };

        Ok(HttpReply {
            status: status.as_u16(),
            body,
        })
    }
}
