//! # Viewing Key Authenticator
//!
//! Gates read access to balances, allowances and history. Queries are not
//! signed, so the caller proves ownership by presenting the key issued to
//! (or chosen by) the account.
//!
//! Only the SHA-256 of a key is stored. Verification hashes the presented
//! key and compares in constant time; an account without a key is compared
//! against a placeholder so both failure paths do the same work and return
//! the same answer.

use super::entities::ContractState;
use super::ledger::load_state;
use super::value_objects::{HashedViewingKey, ViewingKey};
use crate::algorithms::viewing_key::{derive_viewing_key, rotate_seed, KeyDerivationInput};
use crate::errors::TokenError;
use crate::ports::outbound::LedgerStore;
use shared_types::{CanonicalAddr, Env};

/// Derive a fresh key for `addr` from `entropy` and the invocation context,
/// replacing any previous key.
///
/// Bumps the persisted nonce and rotates the secret seed, so repeating the
/// same entropy always yields a different key.
pub fn create<S: LedgerStore + ?Sized>(
    store: &mut S,
    env: &Env,
    addr: &CanonicalAddr,
    entropy: &str,
    prefix: &str,
) -> Result<ViewingKey, TokenError> {
    let state = load_state(store)?;
    let random = env
        .block
        .random
        .as_ref()
        .map(|r| r.as_slice())
        .unwrap_or_default();
    let input = KeyDerivationInput {
        entropy: entropy.as_bytes(),
        height: env.block.height,
        time: env.block.time,
        sender: addr.as_bytes(),
        random,
        nonce: state.key_nonce,
    };
    let key = derive_viewing_key(&state.prng_seed, &input, prefix)
        .ok_or(TokenError::KeyDerivation)?;

    let next = ContractState {
        prng_seed: rotate_seed(&state.prng_seed, &key),
        key_nonce: state.key_nonce.checked_add(1).ok_or(TokenError::Overflow)?,
        ..state
    };
    store.set_state(next)?;
    store.set_viewing_key(addr.clone(), key.hashed())?;
    Ok(key)
}

/// Store a caller-chosen key for `addr`, replacing any previous key.
pub fn set<S: LedgerStore + ?Sized>(
    store: &mut S,
    addr: &CanonicalAddr,
    key: &ViewingKey,
) -> Result<(), TokenError> {
    store.set_viewing_key(addr.clone(), key.hashed())?;
    Ok(())
}

/// True if `presented` is the key currently stored for `addr`.
///
/// "No key set" and "wrong key" both return `false` after the same work.
pub fn authenticate<S: LedgerStore + ?Sized>(
    store: &S,
    addr: &CanonicalAddr,
    presented: &str,
) -> Result<bool, TokenError> {
    let stored = store.viewing_key(addr)?;
    let presented = HashedViewingKey::of(presented.as_bytes());
    let expected = stored.unwrap_or(HashedViewingKey::PLACEHOLDER);
    let matches = expected.matches(&presented);
    Ok(matches && stored.is_some())
}

/// `authenticate`, failing with the uniform `ViewingKeyError`.
pub fn require<S: LedgerStore + ?Sized>(
    store: &S,
    addr: &CanonicalAddr,
    presented: &str,
) -> Result<(), TokenError> {
    if authenticate(store, addr, presented)? {
        Ok(())
    } else {
        Err(TokenError::ViewingKeyError)
    }
}
