//! Client for the Fingertips public-health indicators API.
//!
//! This crate fetches public-health statistics from the UK
//! [Fingertips](https://fingertips.phe.org.uk/) API and returns them as
//! [`Table`]s backed by Polars DataFrames.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fingertips_api::FingertipsClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FingertipsClient::from_env()?;
//!
//!     // Profiles and the indicators they contain
//!     let profiles = client.profiles().await;
//!     let indicators = client.profile_indicators(19).await;
//!
//!     // Indicator values for the areas within one parent area
//!     let data = client.data_for_indicator(90630, 152, Some("E54000008")).await;
//!     if data.is_empty() {
//!         eprintln!("no data");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Resilience
//!
//! Each request has a 30 second timeout. Connection failures and 500, 502,
//! 503 and 504 responses are retried three times, waiting 1s, 2s and 4s.
//! Responses must declare a JSON content type. After every successful
//! request the transport pauses for 200ms to go easy on the service.
//!
//! # Environment Variables
//!
//! Set `FINGERTIPS_BASE_URL` in your environment or `.env` file to point at
//! another deployment of the API:
//!
//! ```bash
//! FINGERTIPS_BASE_URL=https://fingertips.phe.org.uk/api
//! ```

mod client;
mod config;
mod error;
mod params;
mod retry;
mod transport;

pub use client::{
    AREA_TYPES_PATH, FingertipsClient, INDICATOR_DATA_PATH, INDICATOR_ID, INDICATOR_METADATA_PATH,
    PROFILES_PATH, areas_path,
};
pub use config::{
    BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_INITIAL_BACKOFF, DEFAULT_MAX_RETRIES,
    DEFAULT_RETRY_STATUSES, DEFAULT_THROTTLE, DEFAULT_TIMEOUT, TransportConfig,
};
pub use error::{FetchError, FingertipsError};
pub use fingertips_types::Table;
pub use params::{ParamValue, QueryParams};
pub use retry::RetryPolicy;
pub use transport::{HttpTransport, JsonSource, join_url};

/// Result type for Fingertips operations.
pub type Result<T> = std::result::Result<T, FingertipsError>;
