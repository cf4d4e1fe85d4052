//! # Error Types
//!
//! All error types for the token engine.
//!
//! Every failure aborts the invocation with no partial mutation. What reaches
//! the caller is the error kind plus fixed text: messages never embed
//! balances, allowances, keys or whether an account has interacted before.

use crate::domain::value_objects::ContractStatusLevel;
use serde::{Deserialize, Serialize};
use shared_types::{AddressError, Binary};
use thiserror::Error;

/// The one message returned for any viewing-key failure, whether the key was
/// wrong or never set.
pub const VIEWING_KEY_ERROR_MSG: &str =
    "Wrong viewing key for this address or viewing key not set";

// =============================================================================
// TOKEN ERRORS
// =============================================================================

/// Errors raised by engine operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Balance lower than the amount requested.
    #[error("insufficient funds")]
    InsufficientFunds,

    /// Allowance lower than the amount requested.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    /// Allowance expiration has passed.
    #[error("allowance expired")]
    AllowanceExpired,

    /// Arithmetic would exceed 128 bits.
    #[error("amount overflow")]
    Overflow,

    /// Wrong viewing key, or none set. Deliberately not distinguished.
    #[error("{}", VIEWING_KEY_ERROR_MSG)]
    ViewingKeyError,

    /// Address failed validation.
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    /// Amount is zero where a positive amount is required, or uses a
    /// foreign denomination.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Admin-only operation attempted by another account.
    #[error("unauthorized")]
    Unauthorized,

    /// Operation disallowed by the current contract status.
    #[error("operation disallowed while contract status is {0}")]
    ContractStopped(ContractStatusLevel),

    /// Instantiation parameters rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Contract has not been instantiated.
    #[error("contract not initialized")]
    NotInitialized,

    /// Contract was already instantiated.
    #[error("contract already initialized")]
    AlreadyInitialized,

    /// Storage backend failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Request message could not be decoded.
    #[error("parse error: {0}")]
    ParseError(String),

    /// Viewing-key MAC could not be computed.
    #[error("viewing key derivation failed")]
    KeyDerivation,

    /// Response could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Stable, wire-visible name of each error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Balance too low.
    InsufficientFunds,
    /// Allowance too low.
    InsufficientAllowance,
    /// Allowance expired.
    AllowanceExpired,
    /// 128-bit overflow.
    Overflow,
    /// Wrong or unset viewing key.
    ViewingKeyError,
    /// Malformed address.
    InvalidAddress,
    /// Zero or foreign-denom amount.
    InvalidAmount,
    /// Caller is not the admin.
    Unauthorized,
    /// Blocked by contract status.
    ContractStopped,
    /// Bad instantiation parameters.
    InvalidConfiguration,
    /// Not yet instantiated.
    NotInitialized,
    /// Instantiated twice.
    AlreadyInitialized,
    /// Undecodable message.
    ParseError,
    /// Failure inside the engine itself.
    Internal,
}

impl TokenError {
    /// The taxonomy kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InsufficientFunds => ErrorKind::InsufficientFunds,
            Self::InsufficientAllowance => ErrorKind::InsufficientAllowance,
            Self::AllowanceExpired => ErrorKind::AllowanceExpired,
            Self::Overflow => ErrorKind::Overflow,
            Self::ViewingKeyError => ErrorKind::ViewingKeyError,
            Self::InvalidAddress(_) => ErrorKind::InvalidAddress,
            Self::InvalidAmount(_) => ErrorKind::InvalidAmount,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::ContractStopped(_) => ErrorKind::ContractStopped,
            Self::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
            Self::NotInitialized => ErrorKind::NotInitialized,
            Self::AlreadyInitialized => ErrorKind::AlreadyInitialized,
            Self::ParseError(_) => ErrorKind::ParseError,
            Self::Storage(_) | Self::KeyDerivation | Self::Serialization(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Message safe to return to the caller.
    ///
    /// Internal failures collapse to one fixed string so backend details do
    /// not leak through the response. Decoder detail is dropped as well.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Storage(_) | Self::KeyDerivation | Self::Serialization(_) => {
                "internal error".to_string()
            }
            Self::ParseError(_) => "malformed message".to_string(),
            other => other.to_string(),
        }
    }
}

// =============================================================================
// STORAGE ERRORS
// =============================================================================

/// Errors from the storage port.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// A singleton record the engine relies on is absent.
    #[error("missing record: {0}")]
    Missing(&'static str),

    /// Backend failure.
    #[error("backend error: {0}")]
    Backend(String),
}

// =============================================================================
// EXECUTE ERRORS
// =============================================================================

/// A failed execute invocation: the cause plus its padded error body.
///
/// The body has the same envelope length as a successful answer so the
/// outcome cannot be read off the payload size.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{error}")]
pub struct ExecuteError {
    /// What went wrong.
    pub error: TokenError,
    /// Padded `{"error":{...}}` body.
    pub data: Binary,
}

// =============================================================================
// HOST ERRORS
// =============================================================================

/// Errors surfaced by the mock host around an invocation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The sender could not escrow the attached coin; the contract never ran.
    #[error("escrow verification failed: sender lacks {required} {denom}")]
    EscrowFailed {
        /// Amount the sender attached.
        required: u128,
        /// Denomination attached.
        denom: String,
    },

    /// A host message emitted by the contract could not be executed; the
    /// whole invocation was reverted.
    #[error("host message failed: {0}")]
    MessageFailed(String),

    /// The contract rejected the invocation.
    #[error("contract error: {0}")]
    Contract(#[from] ExecuteError),

    /// The contract rejected instantiation.
    #[error("instantiation failed: {0}")]
    Instantiate(TokenError),
}

// =============================================================================
// TESTS
// =============================================================================
