use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;
use thiserror::Error;

pub mod mapper;
pub mod request;

pub use mapper::{MappingError, map_hourly, map_weekly};
pub use request::ForecastRequestBuilder;
pub use reqwest::Url;

/// Transport-level failure talking to the upstream provider.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to upstream failed: {0}")]
    Transport(String),

    #[error("Upstream request failed with status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Performs a single GET and hands back the raw response body.
///
/// Anything other than a successful response is reported as a [`FetchError`];
/// the caller treats it as opaque.
#[async_trait]
pub trait HttpFetch: Send + Sync + Debug {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestFetcher {
    http: Client,
}

impl ReqwestFetcher {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let res = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Transport(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
