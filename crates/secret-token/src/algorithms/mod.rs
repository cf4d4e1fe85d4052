//! # Algorithms Module
//!
//! Viewing-key derivation and response padding.

pub mod padding;
pub mod viewing_key;

pub use padding::{padded_len, space_pad};
pub use viewing_key::{derive_viewing_key, initial_seed, rotate_seed, KeyDerivationInput};
