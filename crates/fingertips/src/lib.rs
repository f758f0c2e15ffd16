#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fingertips/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # fingertips
//!
//! Public-health indicators as Polars tables.
//!
//! fingertips is an umbrella crate that re-exports the fingertips sub-crates
//! for convenience.
//!
//! ## Quick Start
//!
//! ```ignore
//! use fingertips::prelude::*;
//!
//! # async fn example() -> fingertips::Result<()> {
//! let client = FingertipsClient::from_env()?;
//!
//! let area_types = client.area_types().await;
//! let regions = client.areas_for_type(6).await;
//! let indicators = client.try_profile_indicators(19).await?;
//! println!("{}", indicators);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`types`] - [`Table`] and the JSON-to-DataFrame reshaping
//! - [`api`] - Transport, retry policy and the accessors

/// Version information for the fingertips crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Tables
// ============================================================================

/// Tables and payload reshaping.
///
/// - [`Table`] - DataFrame with an optional index column
/// - [`table_from_records`](types::table_from_records) - array of records to table
/// - [`table_from_keyed_records`](types::table_from_keyed_records) - keyed
///   records to table, key promoted to the index
pub mod types {
    pub use fingertips_types::*;
}

// ============================================================================
// API Client
// ============================================================================

/// The Fingertips API client.
///
/// ## Setup
///
/// The public service needs no key. Set `FINGERTIPS_BASE_URL` to target a
/// different deployment.
///
/// ## Example
///
/// ```ignore
/// use fingertips::api::{FingertipsClient, TransportConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = FingertipsClient::with_config(TransportConfig::default())?;
///
///     let data = client.data_for_indicator(90630, 152, None).await;
///     println!("{} rows", data.len());
///
///     Ok(())
/// }
/// ```
pub mod api {
    pub use fingertips_api::*;
}

pub use fingertips_api::{
    FetchError, FingertipsClient, FingertipsError, HttpTransport, JsonSource, QueryParams,
    Result, TransportConfig,
};
pub use fingertips_types::{Table, TableError};
pub use polars;

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use fingertips::prelude::*;
/// ```
///
/// This brings into scope:
/// - Client: [`FingertipsClient`], [`HttpTransport`], [`TransportConfig`]
/// - The source seam: [`JsonSource`], [`QueryParams`]
/// - Data: [`Table`]
/// - Error types: [`Result`], [`FingertipsError`], [`FetchError`]
pub mod prelude {
    pub use crate::{
        FetchError, FingertipsClient, FingertipsError, HttpTransport, JsonSource, QueryParams,
        Result, Table, TransportConfig,
    };
}

// ============================================================================
// Tests
// ============================================================================
