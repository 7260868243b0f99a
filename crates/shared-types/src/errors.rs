//! # Error Types
//!
//! Errors raised while parsing shared identifiers.

use thiserror::Error;

/// Identifier validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// Value is not a `0x`-prefixed hex transaction hash.
    #[error("malformed transaction hash: {0}")]
    MalformedTxHash(String),

    /// Account name is empty.
    #[error("account name must not be empty")]
    EmptyAccountId,

    /// Account name exceeds the length limit.
    #[error("account name too long: {len} chars (max {max})")]
    AccountIdTooLong { len: usize, max: usize },

    /// Account name contains characters outside `[A-Za-z0-9_-]`.
    #[error("invalid account name: {0}")]
    InvalidAccountId(String),
}
