//! Transport configuration.

use crate::{Result, error::FingertipsError};
use reqwest::StatusCode;
use std::{env::VarError, time::Duration};

/// Base URL of the public Fingertips API.
pub const DEFAULT_BASE_URL: &str = "https://fingertips.phe.org.uk/api";

/// Environment variable that overrides the base URL.
pub const BASE_URL_ENV: &str = "FINGERTIPS_BASE_URL";

/// Per-attempt request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Delay before the first retry; doubled for each one after.
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_secs(1);

/// Pause after every successful fetch.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(200);

/// Server errors worth retrying.
pub const DEFAULT_RETRY_STATUSES: [StatusCode; 4] = [
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Settings for an [`HttpTransport`](crate::HttpTransport).
///
/// The defaults match the public service's expectations: a 30 second
/// timeout, three retries on server errors backing off 1s, 2s and 4s, and a
/// 200ms pause after each successful request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Base URL all request paths are appended to.
    pub base_url: String,
    /// Per-attempt request timeout.
    pub timeout: Duration,
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_backoff: Duration,
    /// Statuses that trigger a retry.
    pub retry_statuses: Vec<StatusCode>,
    /// Pause after every successful fetch.
    pub throttle: Duration,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
            retry_statuses: DEFAULT_RETRY_STATUSES.to_vec(),
            throttle: DEFAULT_THROTTLE,
            user_agent: concat!("fingertips-api/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl TransportConfig {
    /// Default settings against the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Default settings, with the base URL taken from `FINGERTIPS_BASE_URL`
    /// when it is set.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is set but is not valid unicode.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        match dotenvy::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Ok(Self::new(url.trim())),
            Ok(_) | Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Ok(Self::default()),
            Err(e) => Err(FingertipsError::Env(e)),
        }
    }

    /// Replace the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the retry schedule.
    #[must_use]
    pub const fn with_retries(mut self, max_retries: u32, initial_backoff: Duration) -> Self {
        self.max_retries = max_retries;
        self.initial_backoff = initial_backoff;
        self
    }

    /// Replace the post-success pause.
    #[must_use]
    pub const fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    /// Replace the per-attempt timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
