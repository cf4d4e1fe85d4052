//! # Allowance Manager
//!
//! Delegated spending limits keyed by (owner, spender).
//!
//! - Increases add to the usable amount and reject overflow.
//! - Decreases subtract with a floor at zero and never fail.
//! - An expired allowance counts as zero. A supplied expiration always
//!   replaces the stored one.

use super::entities::Allowance;
use super::invariants::invariant_spend_within_allowance;
use super::ledger;
use crate::errors::TokenError;
use crate::ports::outbound::LedgerStore;
use shared_types::CanonicalAddr;

/// Stored allowance record for (owner, spender).
pub fn read<S: LedgerStore + ?Sized>(
    store: &S,
    owner: &CanonicalAddr,
    spender: &CanonicalAddr,
) -> Result<Allowance, TokenError> {
    Ok(store.allowance(owner, spender)?)
}

/// Add `amount` to the allowance usable at `now`.
pub fn increase<S: LedgerStore + ?Sized>(
    store: &mut S,
    owner: &CanonicalAddr,
    spender: &CanonicalAddr,
    amount: u128,
    expiration: Option<u64>,
    now: u64,
) -> Result<Allowance, TokenError> {
    let current = store.allowance(owner, spender)?;
    let updated = Allowance {
        amount: current
            .effective_amount(now)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?,
        expiration: expiration.or(current.expiration),
    };
    store.set_allowance(owner.clone(), spender.clone(), updated)?;
    Ok(updated)
}

/// Subtract `amount` from the allowance usable at `now`, flooring at zero.
pub fn decrease<S: LedgerStore + ?Sized>(
    store: &mut S,
    owner: &CanonicalAddr,
    spender: &CanonicalAddr,
    amount: u128,
    expiration: Option<u64>,
    now: u64,
) -> Result<Allowance, TokenError> {
    let current = store.allowance(owner, spender)?;
    let updated = Allowance {
        amount: current.effective_amount(now).saturating_sub(amount),
        expiration: expiration.or(current.expiration),
    };
    store.set_allowance(owner.clone(), spender.clone(), updated)?;
    Ok(updated)
}

/// Draw `amount` from the allowance.
///
/// Fails `AllowanceExpired` if the expiration has passed and
/// `InsufficientAllowance` if the amount is too small.
pub fn spend<S: LedgerStore + ?Sized>(
    store: &mut S,
    owner: &CanonicalAddr,
    spender: &CanonicalAddr,
    amount: u128,
    now: u64,
) -> Result<(), TokenError> {
    let mut allowance = store.allowance(owner, spender)?;
    if allowance.is_expired(now) {
        return Err(TokenError::AllowanceExpired);
    }
    if !invariant_spend_within_allowance(allowance.amount, amount) {
        return Err(TokenError::InsufficientAllowance);
    }
    allowance.amount -= amount;
    store.set_allowance(owner.clone(), spender.clone(), allowance)?;
    Ok(())
}

/// Delegated transfer: `spender` moves `amount` of `owner`'s balance to
/// `receiver`, drawing down the allowance.
///
/// # Returns
/// Id of the new transfer record.
pub fn transfer_from<S: LedgerStore + ?Sized>(
    store: &mut S,
    spender: &CanonicalAddr,
    owner: &CanonicalAddr,
    receiver: &CanonicalAddr,
    amount: u128,
    denom: &str,
    now: u64,
) -> Result<u64, TokenError> {
    if amount == 0 {
        return Err(TokenError::InvalidAmount(
            "transfer amount must be positive".to_string(),
        ));
    }
    spend(store, owner, spender, amount, now)?;
    ledger::transfer(store, spender, owner, receiver, amount, denom)
}
