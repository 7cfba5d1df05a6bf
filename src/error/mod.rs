//! Error handling for the export and import tools.
//!
//! This module provides:
//! - A crate-wide [`SamplerError`] with one variant per failure concern
//! - Structured extraction of Google API error bodies for display
//!
//! # Example
//!
//! ```rust,no_run
//! use firestore_sampler::error::{ConfigError, Result};
//!
//! fn require(value: Option<String>) -> Result<String> {
//!     value.ok_or_else(|| ConfigError::MissingField("FIREBASE_PROJECT_ID".into()).into())
//! }
//! ```

pub mod api;
pub mod kinds;

pub use api::ApiErrorInfo;
pub use kinds::{
    AuthError, ConfigError, FormatError, Result, SafetyError, SamplerError, StoreError,
};
