use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::{Client, Url};

use crate::error::{Context, FetchError, FetchResult, Result};

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Seam between the fetch pipeline and the network.
///
/// Implementations report connectivity problems as [`FetchError::Transport`] and
/// return every received response, whatever its status.
pub trait HttpTransport: Send + Sync {
    fn get<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, FetchResult<HttpResponse>>;
}

/// Production transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("stocks-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to construct HTTP client")?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, FetchResult<HttpResponse>> {
        Box::pin(async move {
            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(describe_send_error)?;

            let status = response.status().as_u16();
            let body = response.text().await.map_err(|err| {
                FetchError::transport(format!(
                    "failed to read response body: {}",
                    err.without_url()
                ))
            })?;

            Ok(HttpResponse { status, body })
        })
    }
}

// reqwest embeds the full URL, token included, in its messages.
fn describe_send_error(err: reqwest::Error) -> FetchError {
    let reason = if err.is_timeout() {
        "request timed out"
    } else if err.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    FetchError::transport(format!("{reason}: {}", err.without_url()))
}
