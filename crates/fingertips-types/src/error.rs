//! Error types for building tables from API payloads.

use thiserror::Error;

/// Errors raised while turning a JSON payload into a [`Table`](crate::Table).
#[derive(Debug, Error)]
pub enum TableError {
    /// The payload is not one of the record shapes the API produces.
    #[error("Unexpected payload shape: {0}")]
    UnexpectedShape(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

/// A specialized Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
