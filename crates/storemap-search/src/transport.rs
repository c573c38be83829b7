//! Transport layer for catalog requests.

use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::{Client, Url};

use crate::error::TransportError;

/// Capability to issue one catalog request.
///
/// Implementations resolve to the raw response body on a 2xx status and to a
/// [`TransportError`] otherwise. The returned future is cancelled by dropping
/// it; the coordinator wraps it in an abort handle to supersede stale
/// requests. Timeout policy, if any, lives in the implementation.
pub trait Transport {
    fn issue(&self, url: Url) -> BoxFuture<'static, Result<Vec<u8>, TransportError>>;
}

/// Production transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with the configured request timeout and
    /// `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn issue(&self, url: Url) -> BoxFuture<'static, Result<Vec<u8>, TransportError>> {
        let client = self.client.clone();
        async move {
            let response = client.get(url.clone()).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(TransportError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }
            let body = response.bytes().await?;
            Ok(body.to_vec())
        }
        .boxed()
    }
}
