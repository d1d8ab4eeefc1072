//! Error types for epoch-engine operations.
//!
//! Parsing never fails with an error: an expression that does not match any
//! supported idiom resolves to `None`. Errors are reserved for caller misuse
//! of [`crate::options`].

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EpochError {
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Invalid century breakpoint: {0} (expected 0..=99)")]
    InvalidBreakpoint(u32),
}

pub type Result<T> = std::result::Result<T, EpochError>;
