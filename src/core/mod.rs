//! Core components of the `esg-dashboard` crate.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`EsgClient`] and its builder.
//! - The primary [`EsgError`] type.
//! - The [`CsvSource`] seam that loaders and the store are generic over.
//! - Numeric and text normalization shared by the record parsers.

/// The main client (`EsgClient`), builder, and configuration.
pub mod client;
/// Text-to-value coercions used while building records.
pub mod conversions;
/// The primary error type (`EsgError`) for the crate.
pub mod error;
/// Source traits for abstracting where CSV text comes from.
pub mod services;

#[cfg(feature = "test-mode")]
pub(crate) mod fixtures;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::EsgClient`
pub use client::{EsgClient, EsgClientBuilder};
pub use error::EsgError;
pub use services::{CsvSource, DirSource};
