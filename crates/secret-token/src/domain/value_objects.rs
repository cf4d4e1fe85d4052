//! # Value Objects
//!
//! Immutable domain primitives defined by their value, not identity.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use shared_types::{constant_time_eq, sha_256, DIGEST_LEN};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

// =============================================================================
// CONTRACT STATUS
// =============================================================================

/// Operating level of the contract, set by the admin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatusLevel {
    /// Every operation allowed.
    #[default]
    NormalRun,
    /// Only redemptions (and admin operations) allowed.
    StopAllButRedeems,
    /// Only admin operations allowed.
    StopAll,
}

impl fmt::Display for ContractStatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NormalRun => "normal_run",
            Self::StopAllButRedeems => "stop_all_but_redeems",
            Self::StopAll => "stop_all",
        };
        f.write_str(s)
    }
}

// =============================================================================
// VIEWING KEYS
// =============================================================================

/// A viewing key in the clear.
///
/// Only ever held transiently: it is returned to its owner once and the
/// store keeps its hash. Zeroized on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ViewingKey(String);

impl ViewingKey {
    /// Wraps a key string.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key text (use immediately and let go).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hash under which the key is stored.
    #[must_use]
    pub fn hashed(&self) -> HashedViewingKey {
        HashedViewingKey::of(self.0.as_bytes())
    }
}

impl fmt::Debug for ViewingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ViewingKey(***)")
    }
}

impl Serialize for ViewingKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ViewingKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self)
    }
}

/// SHA-256 of a viewing key, the only form that is persisted.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct HashedViewingKey(pub [u8; DIGEST_LEN]);

impl HashedViewingKey {
    /// Placeholder compared against when an account has no key, so the
    /// "no key" path does the same work as the "wrong key" path.
    pub const PLACEHOLDER: Self = Self([0u8; DIGEST_LEN]);

    /// Hashes raw key bytes.
    #[must_use]
    pub fn of(key: &[u8]) -> Self {
        Self(sha_256(key))
    }

    /// Constant-time equality.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        constant_time_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for HashedViewingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashedViewingKey({:02x}{:02x}...)", self.0[0], self.0[1])
    }
}
