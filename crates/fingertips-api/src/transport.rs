//! HTTP transport with retry, content-type check and throttling.

use crate::{
    config::TransportConfig,
    error::FetchError,
    params::QueryParams,
    retry::RetryPolicy,
};
use reqwest::{Client, Response, header::CONTENT_TYPE};
use serde_json::Value;
use std::{future::Future, time::Duration};
use tokio::time::sleep;
use tracing::{debug, error, warn};
use url::Url;

/// Characters of a response body kept in diagnostics.
const PREVIEW_CHARS: usize = 200;

/// A source of JSON documents addressed by path and query.
///
/// [`HttpTransport`] is the production implementation; tests substitute
/// their own.
pub trait JsonSource {
    /// Fetches the JSON document at `path` relative to the source's base.
    fn fetch(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

impl<S: JsonSource + Sync + ?Sized> JsonSource for &S {
    fn fetch(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> impl Future<Output = Result<Value, FetchError>> + Send {
        (**self).fetch(path, params)
    }
}

/// Joins a base URL and a relative path with exactly one slash between them.
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Sleeps for `delay` when `result` is a success, then hands it back.
///
/// Failures return immediately.
pub(crate) async fn pause_after_success<T, E>(
    delay: Duration,
    result: Result<T, E>,
) -> Result<T, E> {
    if result.is_ok() && !delay.is_zero() {
        sleep(delay).await;
    }
    result
}

/// Truncates a body for logging.
fn preview(body: &str) -> String {
    match body.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// HTTP transport for the Fingertips API.
///
/// One instance holds a pooled connection context and the request policy.
/// Build it once and share it by reference; calls are made one at a time.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: TransportConfig,
    retry: RetryPolicy,
}

impl HttpTransport {
    /// Creates a transport from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn new(config: TransportConfig) -> Result<Self, FetchError> {
        Url::parse(&config.base_url).map_err(|source| FetchError::InvalidUrl {
            url: config.base_url.clone(),
            source,
        })?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            retry: RetryPolicy::new(config.max_retries, config.initial_backoff),
            config,
        })
    }

    /// Creates a transport with default settings, honouring
    /// `FINGERTIPS_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment is unreadable or the base URL is
    /// invalid.
    pub fn from_env() -> crate::Result<Self> {
        Ok(Self::new(TransportConfig::from_env()?)?)
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Absolute URL for a relative path.
    ///
    /// # Errors
    ///
    /// Returns an error if the joined string is not a valid URL.
    pub fn url(&self, path: &str) -> Result<Url, FetchError> {
        let joined = join_url(&self.config.base_url, path);
        Url::parse(&joined).map_err(|source| FetchError::InvalidUrl {
            url: joined,
            source,
        })
    }

    fn is_transient(&self, err: &FetchError) -> bool {
        match err {
            FetchError::Request { source, .. } => {
                source.is_connect() || source.is_timeout() || source.is_request()
            }
            FetchError::Status { status, .. } => self.config.retry_statuses.contains(status),
            _ => false,
        }
    }

    /// One GET; non-success statuses become [`FetchError::Status`].
    ///
    /// Errors carry the full request URL, query string included.
    async fn attempt(&self, url: &Url, params: &QueryParams) -> Result<Response, FetchError> {
        let mut builder = self.client.get(url.clone());
        if !params.is_empty() {
            builder = builder.query(params);
        }
        let request = builder.build().map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

        let attempted = request.url().to_string();
        debug!(url = %attempted, "GET");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|source| FetchError::Request {
                url: attempted.clone(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let headers = response.headers().clone();
        let body = response.text().await.unwrap_or_default();
        Err(FetchError::Status {
            url: attempted,
            status,
            headers,
            body: preview(&body),
        })
    }

    async fn fetch_json(&self, path: &str, params: &QueryParams) -> Result<Value, FetchError> {
        let base = self.url(path)?;

        let response = self
            .retry
            .run(|_| self.attempt(&base, params), |e| self.is_transient(e))
            .await?;
        let url = response.url().clone();

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let body = response.text().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

        if !content_type.to_ascii_lowercase().contains("json") {
            let preview = preview(&body);
            warn!(%url, %content_type, %preview, "Response is not JSON");
            return Err(FetchError::UnexpectedContentType {
                url: url.to_string(),
                content_type,
                preview,
            });
        }

        let parsed = serde_json::from_str(&body).map_err(|source| FetchError::MalformedJson {
            url: url.to_string(),
            source,
        });
        pause_after_success(self.config.throttle, parsed).await
    }
}

impl JsonSource for HttpTransport {
    async fn fetch(&self, path: &str, params: &QueryParams) -> Result<Value, FetchError> {
        self.fetch_json(path, params).await.inspect_err(|e| match e {
            FetchError::Status {
                url,
                status,
                headers,
                body,
            } => error!(%url, %status, ?headers, %body, "Request failed"),
            FetchError::UnexpectedContentType { .. } => {}
            other => error!(error = %other, "Request failed"),
        })
    }
}
