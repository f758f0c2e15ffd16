#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fingertips/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Tabular types for the Fingertips public-health indicators API.
//!
//! The API answers with either an array of flat records or an object whose
//! values are records keyed by an identifier. This crate turns both shapes
//! into a [`Table`], a Polars DataFrame that optionally carries the name of
//! its index column.

/// The version of the fingertips-types crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod reshape;
pub mod table;

// Re-exports
pub use error::{Result, TableError};
pub use reshape::{table_from_keyed_records, table_from_records};
pub use table::Table;
