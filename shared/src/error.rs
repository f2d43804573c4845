//! Error types

use thiserror::Error;

/// Failure of a call into the host client.
///
/// None of these ever reach the user; callers log them and fall back to a
/// degraded outcome (field omitted, announcement skipped).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostError {
    /// The function table was not installed or the slot is empty.
    #[error("host function {0} is unavailable")]
    Unavailable(&'static str),

    /// The host returned a non-zero error code.
    #[error("host function {function} failed with code {code:#06x}")]
    Call { function: &'static str, code: u32 },

    #[error("string contains an interior NUL byte")]
    InteriorNul,

    #[error("host returned a string that is not valid UTF-8")]
    InvalidUtf8,
}

/// Malformed percent-encoded input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("truncated or non-hex escape at byte {0}")]
    BadEscape(usize),

    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8,
}

/// Invalid configuration override.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("log channel must not be empty")]
    EmptyLogChannel,
}
