//! # Staged Store
//!
//! Write overlay over a committed store. An invocation reads through the
//! overlay (seeing its own writes) and only ever writes into it; the
//! resulting [`WriteSet`] is committed by the caller if, and only if, the
//! invocation succeeded. Dropping the overlay discards everything.

use crate::domain::{Allowance, ContractState, HashedViewingKey, StoredTx, TokenConstants};
use crate::errors::StorageError;
use crate::ports::outbound::{LedgerStore, WriteSet};
use shared_types::CanonicalAddr;

/// Overlay buffering all writes of one invocation.
#[derive(Debug)]
pub struct StagedStore<'a, S: LedgerStore> {
    committed: &'a S,
    writes: WriteSet,
}

impl<'a, S: LedgerStore> StagedStore<'a, S> {
    /// Open an empty overlay.
    pub fn new(committed: &'a S) -> Self {
        Self {
            committed,
            writes: WriteSet::default(),
        }
    }

    /// Consume the overlay, yielding the buffered writes.
    #[must_use]
    pub fn into_write_set(self) -> WriteSet {
        self.writes
    }

    fn staged_for<'w>(
        &'w self,
        addr: &'w CanonicalAddr,
    ) -> impl Iterator<Item = &'w StoredTx> + 'w {
        self.writes
            .transfers
            .iter()
            .filter(move |tx| tx.participants().contains(addr))
    }
}

impl<S: LedgerStore> LedgerStore for StagedStore<'_, S> {
    fn constants(&self) -> Result<Option<TokenConstants>, StorageError> {
        match &self.writes.constants {
            Some(constants) => Ok(Some(constants.clone())),
            None => self.committed.constants(),
        }
    }

    fn state(&self) -> Result<Option<ContractState>, StorageError> {
        match &self.writes.state {
            Some(state) => Ok(Some(state.clone())),
            None => self.committed.state(),
        }
    }

    fn balance(&self, addr: &CanonicalAddr) -> Result<u128, StorageError> {
        match self.writes.balances.get(addr) {
            Some(amount) => Ok(*amount),
            None => self.committed.balance(addr),
        }
    }

    fn allowance(
        &self,
        owner: &CanonicalAddr,
        spender: &CanonicalAddr,
    ) -> Result<Allowance, StorageError> {
        match self
            .writes
            .allowances
            .get(&(owner.clone(), spender.clone()))
        {
            Some(allowance) => Ok(*allowance),
            None => self.committed.allowance(owner, spender),
        }
    }

    fn viewing_key(&self, addr: &CanonicalAddr) -> Result<Option<HashedViewingKey>, StorageError> {
        match self.writes.viewing_keys.get(addr) {
            Some(key) => Ok(Some(*key)),
            None => self.committed.viewing_key(addr),
        }
    }

    fn receiver_code_hash(&self, addr: &CanonicalAddr) -> Result<Option<String>, StorageError> {
        match self.writes.receivers.get(addr) {
            Some(code_hash) => Ok(Some(code_hash.clone())),
            None => self.committed.receiver_code_hash(addr),
        }
    }

    fn transfer(&self, id: u64) -> Result<Option<StoredTx>, StorageError> {
        match self.writes.transfers.iter().find(|tx| tx.id == id) {
            Some(tx) => Ok(Some(tx.clone())),
            None => self.committed.transfer(id),
        }
    }

    fn account_transfer_count(&self, addr: &CanonicalAddr) -> Result<u64, StorageError> {
        let committed = self.committed.account_transfer_count(addr)?;
        Ok(committed + self.staged_for(addr).count() as u64)
    }

    fn account_transfer_id(
        &self,
        addr: &CanonicalAddr,
        index: u64,
    ) -> Result<Option<u64>, StorageError> {
        let committed = self.committed.account_transfer_count(addr)?;
        if index < committed {
            return self.committed.account_transfer_id(addr, index);
        }
        let offset = usize::try_from(index - committed)
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(self.staged_for(addr).nth(offset).map(|tx| tx.id))
    }

    fn set_constants(&mut self, constants: TokenConstants) -> Result<(), StorageError> {
        self.writes.constants = Some(constants);
        Ok(())
    }

    fn set_state(&mut self, state: ContractState) -> Result<(), StorageError> {
        self.writes.state = Some(state);
        Ok(())
    }

    fn set_balance(&mut self, addr: CanonicalAddr, amount: u128) -> Result<(), StorageError> {
        self.writes.balances.insert(addr, amount);
        Ok(())
    }

    fn set_allowance(
        &mut self,
        owner: CanonicalAddr,
        spender: CanonicalAddr,
        allowance: Allowance,
    ) -> Result<(), StorageError> {
        self.writes.allowances.insert((owner, spender), allowance);
        Ok(())
    }

    fn set_viewing_key(
        &mut self,
        addr: CanonicalAddr,
        key: HashedViewingKey,
    ) -> Result<(), StorageError> {
        self.writes.viewing_keys.insert(addr, key);
        Ok(())
    }

    fn set_receiver_code_hash(
        &mut self,
        addr: CanonicalAddr,
        code_hash: String,
    ) -> Result<(), StorageError> {
        self.writes.receivers.insert(addr, code_hash);
        Ok(())
    }

    fn append_transfer(&mut self, tx: StoredTx) -> Result<(), StorageError> {
        self.writes.transfers.push(tx);
        Ok(())
    }
}
