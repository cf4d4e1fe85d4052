//! # Domain Layer for the Token Engine
//!
//! Business logic with no I/O of its own. Components are free functions
//! over the [`LedgerStore`](crate::ports::LedgerStore) port; they never
//! hold state between calls.
//!
//! ## Contents
//!
//! - **entities**: `TokenConstants`, `ContractState`, `Allowance`, `StoredTx`
//! - **value_objects**: `ContractStatusLevel`, `ViewingKey`, `HashedViewingKey`
//! - **ledger**: balances, credit/debit, transfer
//! - **allowance**: delegated spending
//! - **authenticator**: viewing-key creation and verification
//! - **bridge**: deposit and redeem of the native coin
//! - **history**: transfer record log
//! - **invariants**: conservation checks
//!
//! ## Design Principles
//!
//! 1. **No I/O**: all functions are synchronous and touch only the store
//! 2. **Fail whole**: a component may leave partial writes in the store it
//!    was handed; callers run it against a staged overlay and discard the
//!    overlay on error

pub mod allowance;
pub mod authenticator;
pub mod bridge;
mod entities;
pub mod history;
mod invariants;
pub mod ledger;
pub(crate) mod value_objects;

pub use entities::*;
pub use invariants::*;
pub use value_objects::*;
