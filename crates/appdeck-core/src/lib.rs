//! # AppDeck Core
//!
//! Core types shared by every AppDeck crate.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//!
//! # Example
//!
//! ```ignore
//! use appdeck_core::AppError;
//!
//! let error = AppError::not_found(anyhow::anyhow!("App not found"));
//! ```

pub mod errors;

pub use errors::{AppError, ErrorResponse};
