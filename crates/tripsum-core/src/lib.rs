//! Core contracts and helpers for tripsum.
//!
//! This crate defines the summary model written to `summary.json`, the error
//! taxonomy shared by the summarizer and the CLI, and the connection, retry
//! and report settings assembled once at process start.

pub mod backoff;
pub mod error;
pub mod settings;
pub mod summary;

pub use backoff::RetryPolicy;
pub use error::{Error, Result};
pub use settings::{DbSettings, ReportSettings, TableName};
pub use summary::{CityFare, Summary, TopTrip, Trip};

/// Default name of the trips table.
pub const DEFAULT_TABLE: &str = "trips";

/// Default location of the report artifact.
pub const DEFAULT_OUTPUT_PATH: &str = "/out/summary.json";
