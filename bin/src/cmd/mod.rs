//! CLI subcommand modules.
//!
//! This module contains the implementations for all fingertips CLI subcommands.

pub(crate) mod catalog;
pub(crate) mod data;
