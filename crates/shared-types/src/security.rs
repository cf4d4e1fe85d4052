//! # Security Primitives
//!
//! Hashing, keyed MACs and constant-time comparison used by the viewing-key
//! authenticator.
//!
//! ## Security Properties
//!
//! - **SHA-256 only**: secrets are stored as SHA-256 digests, never verbatim.
//! - **Constant time**: secret comparisons go through `subtle`, so the time
//!   taken does not depend on how many leading bytes match.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Length of every digest produced here.
pub const DIGEST_LEN: usize = 32;

/// SHA-256 of `data`.
#[must_use]
pub fn sha_256(data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; DIGEST_LEN];
    hash.copy_from_slice(&result);
    hash
}

/// HMAC-SHA256 over the concatenation of `parts`, keyed by `key`.
///
/// Returns `None` only if the MAC rejects the key length, which HMAC never
/// does.
#[must_use]
pub fn hmac_sha256(key: &[u8], parts: &[&[u8]]) -> Option<[u8; DIGEST_LEN]> {
    let mut mac = HmacSha256::new_from_slice(key).ok()?;
    for part in parts {
        mac.update(part);
    }
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Some(out)
}

/// Constant-time byte comparison.
///
/// The shorter input is padded with a byte that differs from the longer
/// input's padding, so a length mismatch can never compare equal and the
/// comparison still touches `max(a.len(), b.len())` bytes.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let max_len = std::cmp::max(a.len(), b.len());

    let mut a_padded = vec![0u8; max_len];
    let mut b_padded = vec![0xFFu8; max_len];
    a_padded[..a.len()].copy_from_slice(a);
    b_padded[..b.len()].copy_from_slice(b);

    let lengths_equal = a.len().ct_eq(&b.len());
    let contents_equal = a_padded.ct_eq(&b_padded);

    (lengths_equal & contents_equal).into()
}
