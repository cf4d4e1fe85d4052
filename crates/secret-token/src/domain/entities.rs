//! # Domain Entities
//!
//! Records owned by the ledger, allowance and history components.

use super::value_objects::ContractStatusLevel;
use shared_types::{CanonicalAddr, DIGEST_LEN};

/// Token metadata fixed at instantiation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenConstants {
    /// Display name.
    pub name: String,
    /// Ticker symbol; also the denom recorded on transfers.
    pub symbol: String,
    /// Decimal places for display.
    pub decimals: u8,
    /// Whether `token_info` reveals the total supply.
    pub total_supply_is_public: bool,
}

/// Mutable contract-wide state.
#[derive(Clone, PartialEq, Eq)]
pub struct ContractState {
    /// Account allowed to change admin and status.
    pub admin: CanonicalAddr,
    /// Current operating level.
    pub status: ContractStatusLevel,
    /// Sum of all balances; equals the escrowed native coin.
    pub total_supply: u128,
    /// Id of the last recorded transfer (0 = none yet).
    pub tx_count: u64,
    /// Secret seed for viewing-key derivation. Rotated on every derivation.
    pub prng_seed: [u8; DIGEST_LEN],
    /// Number of viewing keys derived so far.
    pub key_nonce: u64,
}

impl std::fmt::Debug for ContractState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractState")
            .field("admin", &self.admin)
            .field("status", &self.status)
            .field("tx_count", &self.tx_count)
            .field("key_nonce", &self.key_nonce)
            .finish_non_exhaustive()
    }
}

/// Delegated-spend record for one (owner, spender) pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Allowance {
    /// Stored amount (may be stale if expired).
    pub amount: u128,
    /// Unix time at which the allowance stops being usable.
    pub expiration: Option<u64>,
}

impl Allowance {
    /// True once `now` has reached the expiration.
    #[must_use]
    pub fn is_expired(&self, now: u64) -> bool {
        self.expiration.is_some_and(|exp| now >= exp)
    }

    /// Amount usable at `now`: zero if expired.
    #[must_use]
    pub fn effective_amount(&self, now: u64) -> u128 {
        if self.is_expired(now) {
            0
        } else {
            self.amount
        }
    }
}

/// A recorded transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredTx {
    /// Sequence id, starting at 1.
    pub id: u64,
    /// Account whose balance was debited.
    pub from: CanonicalAddr,
    /// Account that initiated the transfer (owner or spender).
    pub sender: CanonicalAddr,
    /// Account that was credited.
    pub receiver: CanonicalAddr,
    /// Amount moved.
    pub amount: u128,
    /// Token denom (the symbol).
    pub denom: String,
}

impl StoredTx {
    /// Distinct accounts that can see this record in their history.
    #[must_use]
    pub fn participants(&self) -> Vec<CanonicalAddr> {
        let mut out: Vec<CanonicalAddr> = Vec::with_capacity(3);
        for addr in [&self.from, &self.sender, &self.receiver] {
            if !out.contains(addr) {
                out.push(addr.clone());
            }
        }
        out
    }
}
