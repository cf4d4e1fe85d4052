//! # Core Boundary Entities
//!
//! ## Clusters
//!
//! - **Value**: `Uint128`, `Coin`
//! - **Identity**: `HumanAddr`, `CanonicalAddr`
//! - **Payloads**: `Binary`
//! - **Execution context**: `Env`, `BlockInfo`, `MessageInfo`, `ContractInfo`

use crate::errors::{AddressError, AmountError, BinaryError};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// CLUSTER A: VALUE
// =============================================================================

/// A non-negative 128-bit amount.
///
/// Serialized as a decimal string (`"1000000"`), never as a JSON number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uint128(pub u128);

impl Uint128 {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Largest representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Wraps a raw value.
    #[must_use]
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn u128(self) -> u128 {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Checked addition. `None` on overflow.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction. `None` on underflow.
    #[must_use]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Subtraction floored at zero.
    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl From<u128> for Uint128 {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl From<Uint128> for u128 {
    fn from(value: Uint128) -> Self {
        value.0
    }
}

impl fmt::Display for Uint128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Uint128 {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(AmountError::Empty);
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::NotDecimal(s.to_string()));
        }
        // Only digits remain, so the sole failure mode is overflow.
        s.parse::<u128>().map(Self).map_err(|_| AmountError::Overflow)
    }
}

impl Serialize for Uint128 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Uint128 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// An amount of a named coin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    /// Coin denomination (e.g. `uscrt`).
    pub denom: String,
    /// Amount in the smallest unit.
    pub amount: Uint128,
}

impl Coin {
    /// Creates a coin.
    #[must_use]
    pub fn new(amount: u128, denom: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: Uint128(amount),
        }
    }
}

// =============================================================================
// CLUSTER B: IDENTITY
// =============================================================================

/// Minimum accepted address length.
pub const MIN_ADDRESS_LEN: usize = 3;

/// Maximum accepted address length (bech32 limit).
pub const MAX_ADDRESS_LEN: usize = 90;

/// A human-readable address as supplied by clients.
///
/// Opaque to the engine until canonicalized.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HumanAddr(pub String);

impl HumanAddr {
    /// Wraps a string.
    #[must_use]
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    /// Returns the raw string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validates the address and returns its canonical (lowercase) form.
    pub fn canonicalize(&self) -> Result<CanonicalAddr, AddressError> {
        let raw = self.0.as_str();
        if raw.is_empty() {
            return Err(AddressError::Empty);
        }
        if raw.len() < MIN_ADDRESS_LEN || raw.len() > MAX_ADDRESS_LEN {
            return Err(AddressError::InvalidLength {
                len: raw.len(),
                min: MIN_ADDRESS_LEN,
                max: MAX_ADDRESS_LEN,
            });
        }
        if !raw.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(AddressError::InvalidCharacter);
        }
        Ok(CanonicalAddr(raw.to_ascii_lowercase()))
    }
}

impl fmt::Display for HumanAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HumanAddr {
    fn from(addr: &str) -> Self {
        Self(addr.to_string())
    }
}

/// The canonical form of a validated address. All engine state is keyed by it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CanonicalAddr(String);

impl CanonicalAddr {
    /// Returns the canonical bytes (used when hashing identities).
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Converts back to a human-readable address.
    #[must_use]
    pub fn humanize(&self) -> HumanAddr {
        HumanAddr(self.0.clone())
    }
}

impl fmt::Display for CanonicalAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// CLUSTER C: PAYLOADS
// =============================================================================

/// Opaque bytes, standard base64 (padded) on the wire.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Binary(pub Vec<u8>);

impl Binary {
    /// Wraps bytes.
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Decodes a standard base64 string.
    pub fn from_base64(s: &str) -> Result<Self, BinaryError> {
        STANDARD
            .decode(s)
            .map(Self)
            .map_err(|e| BinaryError::InvalidBase64(e.to_string()))
    }

    /// Returns the bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Standard base64 encoding.
    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }
}

impl fmt::Debug for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Binary({})", self.to_base64())
    }
}

impl From<Vec<u8>> for Binary {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Binary {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl Serialize for Binary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for Binary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_base64(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// CLUSTER D: EXECUTION CONTEXT
// =============================================================================

/// Block the invocation executes in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
    /// Block height.
    pub height: u64,
    /// Block time (unix seconds).
    pub time: u64,
    /// Chain identifier.
    pub chain_id: String,
    /// Per-invocation randomness supplied by the host, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random: Option<Binary>,
}

/// The message being executed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageInfo {
    /// Authenticated signer of the transaction.
    pub sender: HumanAddr,
    /// Native coins escrowed into the contract with this call.
    pub sent_funds: Vec<Coin>,
}

/// The contract being executed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractInfo {
    /// The contract's own address (holder of the escrow).
    pub address: HumanAddr,
    /// Code hash of the contract.
    pub code_hash: String,
}

/// Full execution context handed to the engine by the host.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Env {
    /// Block information.
    pub block: BlockInfo,
    /// Message information.
    pub message: MessageInfo,
    /// Contract information.
    pub contract: ContractInfo,
}
