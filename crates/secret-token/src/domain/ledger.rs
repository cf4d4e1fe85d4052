//! # Ledger
//!
//! Per-account balances. Every debit is checked; a balance can never go
//! negative and a transfer either moves the full amount or nothing.

use super::entities::{ContractState, TokenConstants};
use super::history;
use crate::errors::TokenError;
use crate::ports::outbound::LedgerStore;
use shared_types::CanonicalAddr;

/// Contract state, or `NotInitialized`.
pub fn load_state<S: LedgerStore + ?Sized>(store: &S) -> Result<ContractState, TokenError> {
    store.state()?.ok_or(TokenError::NotInitialized)
}

/// Token metadata, or `NotInitialized`.
pub fn load_constants<S: LedgerStore + ?Sized>(store: &S) -> Result<TokenConstants, TokenError> {
    store.constants()?.ok_or(TokenError::NotInitialized)
}

/// Current balance of `addr`.
pub fn balance<S: LedgerStore + ?Sized>(store: &S, addr: &CanonicalAddr) -> Result<u128, TokenError> {
    Ok(store.balance(addr)?)
}

/// Increase a balance.
///
/// Balances are bounded by the total supply, so overflow here means the
/// supply accounting is already broken; it is still reported, not wrapped.
pub fn credit<S: LedgerStore + ?Sized>(
    store: &mut S,
    addr: &CanonicalAddr,
    amount: u128,
) -> Result<(), TokenError> {
    let current = store.balance(addr)?;
    let updated = current.checked_add(amount).ok_or(TokenError::Overflow)?;
    store.set_balance(addr.clone(), updated)?;
    Ok(())
}

/// Decrease a balance; fails `InsufficientFunds` rather than going negative.
pub fn debit<S: LedgerStore + ?Sized>(
    store: &mut S,
    addr: &CanonicalAddr,
    amount: u128,
) -> Result<(), TokenError> {
    let current = store.balance(addr)?;
    let updated = current
        .checked_sub(amount)
        .ok_or(TokenError::InsufficientFunds)?;
    store.set_balance(addr.clone(), updated)?;
    Ok(())
}

/// Move `amount` from `owner` to `receiver` on behalf of `sender` and record
/// the transfer.
///
/// `sender` is the account that initiated the move: the owner itself for a
/// plain transfer, the spender for a delegated one.
///
/// # Returns
/// Id of the new transfer record.
pub fn transfer<S: LedgerStore + ?Sized>(
    store: &mut S,
    sender: &CanonicalAddr,
    owner: &CanonicalAddr,
    receiver: &CanonicalAddr,
    amount: u128,
    denom: &str,
) -> Result<u64, TokenError> {
    if amount == 0 {
        return Err(TokenError::InvalidAmount(
            "transfer amount must be positive".to_string(),
        ));
    }
    debit(store, owner, amount)?;
    credit(store, receiver, amount)?;
    history::record(store, owner, sender, receiver, amount, denom)
}
