//! Visastat Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the visastat workspace.
//!
//! # Overview
//!
//! This crate provides common functionality used across all visastat
//! workspace members:
//!
//! - **Error Handling**: Custom error types and result types
//! - **Checksums**: Streaming file digests for manifest records
//! - **Logging**: Tracing subscriber configuration and initialization
//! - **Types**: Shared domain types (ingestion variants)

pub mod checksum;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{Result, VisastatError};
pub use types::{VariantFamily, VariantTag};
