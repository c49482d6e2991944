//! Entity identities and error types for loam.
//!
//! This crate provides:
//! - [`Identity`] - 128-bit globally unique entity identities
//! - [`Error`] - Error types for recoverable container misuse
//! - [`Result`] - Result alias used throughout the workspace

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod identity;

pub use error::{Error, Result};
pub use identity::Identity;
