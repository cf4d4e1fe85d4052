//! # Secret Token - Confidential Fungible Token Engine
//!
//! A SNIP-20 style token: balances, allowances and transfer history are
//! private to their owners, native coin is wrapped 1:1 and every execute
//! response is padded so its length does not reveal which operation ran.
//!
//! ## Architecture
//!
//! ```text
//! [Host] ──Env + HandleMsg──→ [TokenContract]
//!                                   │ status gate, sender canonicalized
//!                                   ↓
//!                            [StagedStore] ←── domain components
//!                                   │            (ledger, allowance,
//!                                   │             authenticator, bridge,
//!                                   ↓             history)
//!                      WriteSet applied on success only
//!                                   │
//!                                   ↓
//!                  padded response + HostMsg list ──→ [Host]
//! ```
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Supply equals sum of balances | `domain/invariants.rs` - `invariant_supply_matches_balances()` |
//! | Supply backed by escrow | `domain/invariants.rs` - `invariant_supply_backed_by_escrow()` |
//! | Spend within allowance | `domain/allowance.rs` - `spend()` |
//! | Failed invocation leaves no trace | `service.rs` - staged dispatch, `WriteSet` applied last |
//! | Execute responses padded to 256 bytes | `algorithms/padding.rs` - `space_pad()` |
//!
//! ## Privacy
//!
//! - Only the SHA-256 of a viewing key is stored
//! - Key comparison is constant time; a missing key is compared against a
//!   placeholder and fails with the same error as a wrong key
//! - Logs carry operation names and error kinds, never addresses or amounts
//!
//! ## Usage Example
//!
//! ```ignore
//! use secret_token::prelude::*;
//!
//! let mut host = MockHost::new(EngineConfig::default())?;
//! host.instantiate(&admin, init_msg)?;
//! host.execute(&alice, HandleMsg::Deposit {}, &[Coin::new(1_000_000, "uscrt")])?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod errors;
pub mod msg;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::{
        check_ledger_invariants, Allowance, ContractState, ContractStatusLevel, InvariantViolation,
        StoredTx, TokenConstants, ViewingKey,
    };

    // Messages
    pub use crate::msg::{
        HandleAnswer, HandleMsg, HandleResponse, InitConfig, InitMsg, QueryAnswer, QueryMsg,
        ReceiverHandleMsg, ResponseStatus, Tx,
    };

    // Ports
    pub use crate::ports::{LedgerStore, TokenContractApi, WriteSet};

    // Adapters
    pub use crate::adapters::{DeliveredCallback, InMemoryStore, MockHost, StagedStore};

    // Service
    pub use crate::service::{ContractStats, TokenContract};

    // Config and errors
    pub use crate::config::{ConfigError, EngineConfig};
    pub use crate::errors::{ErrorKind, ExecuteError, HostError, StorageError, TokenError};

    // Boundary types
    pub use shared_types::{Binary, BlockInfo, Coin, Env, HostMsg, HumanAddr, Uint128};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
