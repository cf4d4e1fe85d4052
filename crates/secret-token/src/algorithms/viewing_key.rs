//! # Viewing Key Derivation
//!
//! A key is an HMAC-SHA256 over caller entropy and per-invocation context,
//! keyed by the contract's secret seed:
//!
//! ```text
//! key  = prefix || hex(HMAC(seed; len(entropy) || entropy || height || time
//!                               || len(sender) || sender || len(random) || random || nonce))
//! seed' = SHA-256(seed || key)
//! ```
//!
//! Lengths are u64 big-endian, so no two distinct inputs share a MAC message.
//! The nonce is persisted and bumped on every derivation and the seed rotates
//! after each one, so the same entropy never yields the same key twice, even
//! within one block.

use crate::domain::ViewingKey;
use sha2::{Digest, Sha256};
use shared_types::{hmac_sha256, DIGEST_LEN};

/// Everything mixed into one derivation besides the seed.
#[derive(Clone, Copy, Debug)]
pub struct KeyDerivationInput<'a> {
    /// Caller-supplied entropy.
    pub entropy: &'a [u8],
    /// Block height of the invocation.
    pub height: u64,
    /// Block time of the invocation.
    pub time: u64,
    /// Canonical sender bytes.
    pub sender: &'a [u8],
    /// Host randomness for this invocation (empty if the host gave none).
    pub random: &'a [u8],
    /// Persisted derivation counter.
    pub nonce: u64,
}

/// Derive a viewing key from the secret seed.
///
/// Returns `None` only if the MAC cannot be keyed, which HMAC never refuses.
#[must_use]
pub fn derive_viewing_key(
    seed: &[u8; DIGEST_LEN],
    input: &KeyDerivationInput<'_>,
    prefix: &str,
) -> Option<ViewingKey> {
    let entropy_len = frame_len(input.entropy);
    let height = input.height.to_be_bytes();
    let time = input.time.to_be_bytes();
    let sender_len = frame_len(input.sender);
    let random_len = frame_len(input.random);
    let nonce = input.nonce.to_be_bytes();
    let mac = hmac_sha256(
        seed,
        &[
            entropy_len.as_slice(),
            input.entropy,
            height.as_slice(),
            time.as_slice(),
            sender_len.as_slice(),
            input.sender,
            random_len.as_slice(),
            input.random,
            nonce.as_slice(),
        ],
    )?;
    Some(ViewingKey::new(format!("{prefix}{}", hex::encode(mac))))
}

fn frame_len(part: &[u8]) -> [u8; 8] {
    (part.len() as u64).to_be_bytes()
}

/// Next seed after deriving `key`.
#[must_use]
pub fn rotate_seed(seed: &[u8; DIGEST_LEN], key: &ViewingKey) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(seed);
    hasher.update(key.as_str().as_bytes());
    hasher.finalize().into()
}

/// Initial secret seed from the instantiation seed material.
#[must_use]
pub fn initial_seed(prng_seed: &[u8]) -> [u8; DIGEST_LEN] {
    Sha256::digest(prng_seed).into()
}
