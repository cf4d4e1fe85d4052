//! # Coin Bridge
//!
//! Converts between escrowed native coin and ledger balance at a fixed 1:1
//! rate. The host escrows attached coin before the contract runs and
//! executes the returned bank message in the same atomic unit, so a failed
//! invocation neither credits nor releases anything.

use super::ledger::{self, load_state};
use crate::errors::TokenError;
use crate::ports::outbound::LedgerStore;
use shared_types::{CanonicalAddr, Coin, HostMsg, HumanAddr};

/// Total of the native coin in `funds`.
///
/// Fails `InvalidAmount` if any coin has another denom or the total is zero.
pub fn native_amount(funds: &[Coin], native_denom: &str) -> Result<u128, TokenError> {
    let mut total: u128 = 0;
    for coin in funds {
        if coin.denom != native_denom {
            return Err(TokenError::InvalidAmount(format!(
                "only {native_denom} is accepted"
            )));
        }
        total = total
            .checked_add(coin.amount.u128())
            .ok_or(TokenError::Overflow)?;
    }
    if total == 0 {
        return Err(TokenError::InvalidAmount(format!(
            "no {native_denom} was sent"
        )));
    }
    Ok(total)
}

/// Credit `addr` with the native coin escrowed by this invocation.
///
/// # Returns
/// The amount credited.
pub fn deposit<S: LedgerStore + ?Sized>(
    store: &mut S,
    addr: &CanonicalAddr,
    funds: &[Coin],
    native_denom: &str,
) -> Result<u128, TokenError> {
    let amount = native_amount(funds, native_denom)?;
    let mut state = load_state(store)?;
    state.total_supply = state
        .total_supply
        .checked_add(amount)
        .ok_or(TokenError::Overflow)?;
    ledger::credit(store, addr, amount)?;
    store.set_state(state)?;
    Ok(amount)
}

/// Debit `addr` and release the same amount of native coin from escrow.
///
/// # Returns
/// The bank message the host must execute to release the coin.
pub fn redeem<S: LedgerStore + ?Sized>(
    store: &mut S,
    contract: &HumanAddr,
    addr: &CanonicalAddr,
    amount: u128,
    native_denom: &str,
) -> Result<HostMsg, TokenError> {
    if amount == 0 {
        return Err(TokenError::InvalidAmount(
            "redeem amount must be positive".to_string(),
        ));
    }
    ledger::debit(store, addr, amount)?;
    let mut state = load_state(store)?;
    state.total_supply = state
        .total_supply
        .checked_sub(amount)
        .ok_or(TokenError::InsufficientFunds)?;
    store.set_state(state)?;

    Ok(HostMsg::bank_send(
        contract.clone(),
        addr.humanize(),
        Coin::new(amount, native_denom),
    ))
}
