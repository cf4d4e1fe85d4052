//! # Error Types
//!
//! Errors raised while parsing boundary primitives.

use thiserror::Error;

/// Errors that can occur when validating an address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Address string is empty.
    #[error("Address is empty")]
    Empty,

    /// Address length outside the accepted range.
    #[error("Address length {len} outside {min}..={max}")]
    InvalidLength { len: usize, min: usize, max: usize },

    /// Address contains whitespace, control or non-ASCII characters.
    #[error("Address contains an invalid character")]
    InvalidCharacter,
}

/// Errors that can occur when parsing an amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Amount string is empty.
    #[error("Amount is empty")]
    Empty,

    /// Amount is not a plain decimal integer.
    #[error("Amount is not a decimal integer: {0}")]
    NotDecimal(String),

    /// Amount does not fit in 128 bits.
    #[error("Amount exceeds 128 bits")]
    Overflow,
}

/// Errors that can occur when decoding opaque binary payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BinaryError {
    /// Payload is not valid base64.
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),
}
