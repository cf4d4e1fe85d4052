//! # Outbound Ports (Driven Ports)
//!
//! The keyed store every engine operation reads and writes. All state is
//! addressed explicitly through this port; there is no ambient global state.
//!
//! Writes are never applied piecemeal by the domain. An invocation runs
//! against a staged overlay and its [`WriteSet`] is committed through
//! [`LedgerStore::apply`] only if the whole invocation succeeded.

use crate::domain::{Allowance, ContractState, HashedViewingKey, StoredTx, TokenConstants};
use crate::errors::StorageError;
use shared_types::CanonicalAddr;
use std::collections::BTreeMap;

/// Abstract interface for token state storage.
pub trait LedgerStore {
    // =========================================================================
    // READS
    // =========================================================================

    /// Token metadata, `None` before instantiation.
    fn constants(&self) -> Result<Option<TokenConstants>, StorageError>;

    /// Contract-wide mutable state, `None` before instantiation.
    fn state(&self) -> Result<Option<ContractState>, StorageError>;

    /// Balance of an account (zero if never credited).
    fn balance(&self, addr: &CanonicalAddr) -> Result<u128, StorageError>;

    /// Allowance record (default if never granted).
    fn allowance(
        &self,
        owner: &CanonicalAddr,
        spender: &CanonicalAddr,
    ) -> Result<Allowance, StorageError>;

    /// Stored viewing-key hash for an account.
    fn viewing_key(&self, addr: &CanonicalAddr) -> Result<Option<HashedViewingKey>, StorageError>;

    /// Callback code hash registered by an account.
    fn receiver_code_hash(&self, addr: &CanonicalAddr) -> Result<Option<String>, StorageError>;

    /// Transfer record by id.
    fn transfer(&self, id: u64) -> Result<Option<StoredTx>, StorageError>;

    /// Number of transfer records visible to an account.
    fn account_transfer_count(&self, addr: &CanonicalAddr) -> Result<u64, StorageError>;

    /// Id of the `index`-th (oldest first) transfer visible to an account.
    fn account_transfer_id(
        &self,
        addr: &CanonicalAddr,
        index: u64,
    ) -> Result<Option<u64>, StorageError>;

    // =========================================================================
    // WRITES
    // =========================================================================

    /// Store token metadata.
    fn set_constants(&mut self, constants: TokenConstants) -> Result<(), StorageError>;

    /// Store contract state.
    fn set_state(&mut self, state: ContractState) -> Result<(), StorageError>;

    /// Overwrite an account balance.
    fn set_balance(&mut self, addr: CanonicalAddr, amount: u128) -> Result<(), StorageError>;

    /// Overwrite an allowance record.
    fn set_allowance(
        &mut self,
        owner: CanonicalAddr,
        spender: CanonicalAddr,
        allowance: Allowance,
    ) -> Result<(), StorageError>;

    /// Overwrite an account's viewing-key hash.
    fn set_viewing_key(
        &mut self,
        addr: CanonicalAddr,
        key: HashedViewingKey,
    ) -> Result<(), StorageError>;

    /// Register a callback code hash for an account.
    fn set_receiver_code_hash(
        &mut self,
        addr: CanonicalAddr,
        code_hash: String,
    ) -> Result<(), StorageError>;

    /// Append a transfer record and index it under each distinct participant.
    fn append_transfer(&mut self, tx: StoredTx) -> Result<(), StorageError>;

    /// Commit a staged write set.
    ///
    /// Transfers are appended in the order they were staged.
    fn apply(&mut self, writes: WriteSet) -> Result<(), StorageError> {
        let WriteSet {
            constants,
            state,
            balances,
            allowances,
            viewing_keys,
            receivers,
            transfers,
        } = writes;

        if let Some(constants) = constants {
            self.set_constants(constants)?;
        }
        if let Some(state) = state {
            self.set_state(state)?;
        }
        for (addr, amount) in balances {
            self.set_balance(addr, amount)?;
        }
        for ((owner, spender), allowance) in allowances {
            self.set_allowance(owner, spender, allowance)?;
        }
        for (addr, key) in viewing_keys {
            self.set_viewing_key(addr, key)?;
        }
        for (addr, code_hash) in receivers {
            self.set_receiver_code_hash(addr, code_hash)?;
        }
        for tx in transfers {
            self.append_transfer(tx)?;
        }
        Ok(())
    }
}

/// Writes buffered during one invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteSet {
    /// Replacement token metadata.
    pub constants: Option<TokenConstants>,
    /// Replacement contract state.
    pub state: Option<ContractState>,
    /// Final balance per touched account.
    pub balances: BTreeMap<CanonicalAddr, u128>,
    /// Final allowance per touched (owner, spender) pair.
    pub allowances: BTreeMap<(CanonicalAddr, CanonicalAddr), Allowance>,
    /// Replacement viewing-key hashes.
    pub viewing_keys: BTreeMap<CanonicalAddr, HashedViewingKey>,
    /// Registered callback code hashes.
    pub receivers: BTreeMap<CanonicalAddr, String>,
    /// New transfer records, oldest first.
    pub transfers: Vec<StoredTx>,
}

impl WriteSet {
    /// True if nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constants.is_none()
            && self.state.is_none()
            && self.balances.is_empty()
            && self.allowances.is_empty()
            && self.viewing_keys.is_empty()
            && self.receivers.is_empty()
            && self.transfers.is_empty()
    }
}
