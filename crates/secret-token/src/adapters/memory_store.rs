//! # In-Memory Store
//!
//! `LedgerStore` backed by ordered maps. Used by the mock host, the tests and
//! the benches; a chain deployment would back the same port with the host's
//! key-value storage.

use crate::domain::{Allowance, ContractState, HashedViewingKey, StoredTx, TokenConstants};
use crate::errors::StorageError;
use crate::ports::outbound::LedgerStore;
use shared_types::CanonicalAddr;
use std::collections::BTreeMap;

/// In-memory token state.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    constants: Option<TokenConstants>,
    state: Option<ContractState>,
    balances: BTreeMap<CanonicalAddr, u128>,
    allowances: BTreeMap<(CanonicalAddr, CanonicalAddr), Allowance>,
    viewing_keys: BTreeMap<CanonicalAddr, HashedViewingKey>,
    receivers: BTreeMap<CanonicalAddr, String>,
    /// Transfer records; record `id` lives at index `id - 1`.
    transfers: Vec<StoredTx>,
    /// Per-account transfer ids, oldest first.
    account_transfers: BTreeMap<CanonicalAddr, Vec<u64>>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of every balance, saturating at `u128::MAX`.
    #[must_use]
    pub fn sum_balances(&self) -> u128 {
        self.balances
            .values()
            .fold(0u128, |acc, amount| acc.saturating_add(*amount))
    }

    /// Number of accounts holding a non-zero balance.
    #[must_use]
    pub fn holder_count(&self) -> usize {
        self.balances.values().filter(|amount| **amount > 0).count()
    }

    /// Total number of transfer records.
    #[must_use]
    pub fn transfer_count(&self) -> usize {
        self.transfers.len()
    }
}

impl LedgerStore for InMemoryStore {
    fn constants(&self) -> Result<Option<TokenConstants>, StorageError> {
        Ok(self.constants.clone())
    }

    fn state(&self) -> Result<Option<ContractState>, StorageError> {
        Ok(self.state.clone())
    }

    fn balance(&self, addr: &CanonicalAddr) -> Result<u128, StorageError> {
        Ok(self.balances.get(addr).copied().unwrap_or_default())
    }

    fn allowance(
        &self,
        owner: &CanonicalAddr,
        spender: &CanonicalAddr,
    ) -> Result<Allowance, StorageError> {
        Ok(self
            .allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or_default())
    }

    fn viewing_key(&self, addr: &CanonicalAddr) -> Result<Option<HashedViewingKey>, StorageError> {
        Ok(self.viewing_keys.get(addr).copied())
    }

    fn receiver_code_hash(&self, addr: &CanonicalAddr) -> Result<Option<String>, StorageError> {
        Ok(self.receivers.get(addr).cloned())
    }

    fn transfer(&self, id: u64) -> Result<Option<StoredTx>, StorageError> {
        let Some(index) = id.checked_sub(1) else {
            return Ok(None);
        };
        let index = usize::try_from(index).map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(self.transfers.get(index).cloned())
    }

    fn account_transfer_count(&self, addr: &CanonicalAddr) -> Result<u64, StorageError> {
        Ok(self
            .account_transfers
            .get(addr)
            .map_or(0, |ids| ids.len() as u64))
    }

    fn account_transfer_id(
        &self,
        addr: &CanonicalAddr,
        index: u64,
    ) -> Result<Option<u64>, StorageError> {
        let index = usize::try_from(index).map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(self
            .account_transfers
            .get(addr)
            .and_then(|ids| ids.get(index))
            .copied())
    }

    fn set_constants(&mut self, constants: TokenConstants) -> Result<(), StorageError> {
        self.constants = Some(constants);
        Ok(())
    }

    fn set_state(&mut self, state: ContractState) -> Result<(), StorageError> {
        self.state = Some(state);
        Ok(())
    }

    fn set_balance(&mut self, addr: CanonicalAddr, amount: u128) -> Result<(), StorageError> {
        self.balances.insert(addr, amount);
        Ok(())
    }

    fn set_allowance(
        &mut self,
        owner: CanonicalAddr,
        spender: CanonicalAddr,
        allowance: Allowance,
    ) -> Result<(), StorageError> {
        self.allowances.insert((owner, spender), allowance);
        Ok(())
    }

    fn set_viewing_key(
        &mut self,
        addr: CanonicalAddr,
        key: HashedViewingKey,
    ) -> Result<(), StorageError> {
        self.viewing_keys.insert(addr, key);
        Ok(())
    }

    fn set_receiver_code_hash(
        &mut self,
        addr: CanonicalAddr,
        code_hash: String,
    ) -> Result<(), StorageError> {
        self.receivers.insert(addr, code_hash);
        Ok(())
    }

    fn append_transfer(&mut self, tx: StoredTx) -> Result<(), StorageError> {
        let expected = self.transfers.len() as u64 + 1;
        if tx.id != expected {
            return Err(StorageError::Backend(format!(
                "transfer id {} appended out of sequence (expected {expected})",
                tx.id
            )));
        }
        for participant in tx.participants() {
            self.account_transfers
                .entry(participant)
                .or_default()
                .push(tx.id);
        }
        self.transfers.push(tx);
        Ok(())
    }
}
