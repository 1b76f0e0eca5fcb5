//! Errors produced while decoding instruction data or resolving account roles.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("truncated input: {context} requires {needed} bytes, {remaining} remaining")]
    TruncatedInput {
        context: &'static str,
        needed: usize,
        remaining: usize,
    },
    #[error("unknown instruction variant with discriminator {0}")]
    UnknownVariant(u32),
    #[error("malformed field `{field}`: {reason}")]
    MalformedField { field: &'static str, reason: String },
    #[error(
        "insufficient accounts: {instruction} requires at least {required} accounts, got {actual}"
    )]
    InsufficientAccounts {
        instruction: &'static str,
        required: usize,
        actual: usize,
    },
    #[error(
        "account index {index} of {instruction} is out of bounds for {len} transaction accounts"
    )]
    AccountIndexOutOfBounds {
        instruction: &'static str,
        index: u8,
        len: usize,
    },
}
