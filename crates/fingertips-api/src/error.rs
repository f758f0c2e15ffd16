//! Error types for the Fingertips API client.

use fingertips_types::TableError;
use reqwest::{StatusCode, header::HeaderMap};
use thiserror::Error;

/// Why a fetch produced no usable JSON.
///
/// Every variant is terminal: retries have already been spent by the time
/// one of these reaches the caller.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The base URL or a request path did not form a valid URL.
    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
        /// Parser error.
        source: url::ParseError,
    },

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection, DNS, timeout or body read failure.
    #[error("HTTP request to {url} failed: {source}")]
    Request {
        /// The requested URL.
        url: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}: {body}")]
    Status {
        /// The requested URL.
        url: String,
        /// Response status.
        status: StatusCode,
        /// Response headers.
        headers: HeaderMap,
        /// Truncated response body.
        body: String,
    },

    /// The response did not declare a JSON content type.
    #[error("Expected JSON from {url} but got content type {content_type:?}: {preview}")]
    UnexpectedContentType {
        /// The requested URL.
        url: String,
        /// The declared content type, empty if none was sent.
        content_type: String,
        /// Truncated response body.
        preview: String,
    },

    /// The response declared JSON but the body did not parse.
    #[error("Malformed JSON from {url}: {source}")]
    MalformedJson {
        /// The requested URL.
        url: String,
        /// Parser error.
        source: serde_json::Error,
    },
}

impl FetchError {
    /// The HTTP status, for errors that carry one.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors returned by the strict accessors.
#[derive(Debug, Error)]
pub enum FingertipsError {
    /// The request failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The payload could not be turned into a table.
    #[error(transparent)]
    Table(#[from] TableError),

    /// Environment variable error.
    #[error("Environment error: {0}")]
    Env(#[from] dotenvy::Error),
}
