//! # Transfer History
//!
//! Append-only log of transfers. Ids start at 1 and increase by one per
//! record. Each record is visible to every distinct participant (owner,
//! initiating sender, receiver) exactly once. Pages are served
//! most-recent-first.

use super::entities::StoredTx;
use super::ledger::load_state;
use crate::errors::{StorageError, TokenError};
use crate::ports::outbound::LedgerStore;
use shared_types::CanonicalAddr;

/// Append a transfer record.
///
/// # Returns
/// The id assigned to the record.
pub fn record<S: LedgerStore + ?Sized>(
    store: &mut S,
    from: &CanonicalAddr,
    sender: &CanonicalAddr,
    receiver: &CanonicalAddr,
    amount: u128,
    denom: &str,
) -> Result<u64, TokenError> {
    let mut state = load_state(store)?;
    let id = state.tx_count.checked_add(1).ok_or(TokenError::Overflow)?;
    state.tx_count = id;

    store.append_transfer(StoredTx {
        id,
        from: from.clone(),
        sender: sender.clone(),
        receiver: receiver.clone(),
        amount,
        denom: denom.to_string(),
    })?;
    store.set_state(state)?;
    Ok(id)
}

/// One page of the records visible to `addr`, newest first.
///
/// Page `n` holds the records ranked `n * page_size .. (n + 1) * page_size`
/// counting back from the newest. Pages past the end, and a page size of
/// zero, are empty.
pub fn query<S: LedgerStore + ?Sized>(
    store: &S,
    addr: &CanonicalAddr,
    page: u32,
    page_size: u32,
) -> Result<Vec<StoredTx>, TokenError> {
    let count = store.account_transfer_count(addr)?;
    let skip = u64::from(page).saturating_mul(u64::from(page_size));
    if page_size == 0 || skip >= count {
        return Ok(Vec::new());
    }

    let end = count - skip;
    let start = end.saturating_sub(u64::from(page_size));
    let mut txs = Vec::with_capacity((end - start) as usize);
    for index in (start..end).rev() {
        let id = store
            .account_transfer_id(addr, index)?
            .ok_or(StorageError::Missing("account transfer index"))?;
        let tx = store
            .transfer(id)?
            .ok_or(StorageError::Missing("transfer record"))?;
        txs.push(tx);
    }
    Ok(txs)
}
