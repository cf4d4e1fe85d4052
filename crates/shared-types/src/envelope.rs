//! # Host Messages
//!
//! Side effects the engine asks the host to perform once an invocation has
//! committed. The host executes them in the same all-or-nothing unit as the
//! invocation itself: if any message fails, the whole transaction reverts.

use crate::entities::{Binary, Coin, HumanAddr};
use serde::{Deserialize, Serialize};

/// Native bank operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BankMsg {
    /// Move native coin out of an account held by the sender.
    Send {
        /// Paying account (the contract itself for releases from escrow).
        from_address: HumanAddr,
        /// Receiving account.
        to_address: HumanAddr,
        /// Coins to move.
        amount: Vec<Coin>,
    },
}

/// Calls into other contracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WasmMsg {
    /// Execute a message on another contract.
    Execute {
        /// Target contract.
        contract_addr: HumanAddr,
        /// Code hash the target registered for callbacks.
        callback_code_hash: String,
        /// Serialized message for the target.
        msg: Binary,
        /// Native coin forwarded with the call.
        send: Vec<Coin>,
    },
}

/// Any effect the host may be asked to perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostMsg {
    /// Bank module message.
    Bank(BankMsg),
    /// Contract call.
    Wasm(WasmMsg),
}

impl HostMsg {
    /// Convenience constructor for a single-coin bank send.
    #[must_use]
    pub fn bank_send(from: HumanAddr, to: HumanAddr, coin: Coin) -> Self {
        Self::Bank(BankMsg::Send {
            from_address: from,
            to_address: to,
            amount: vec![coin],
        })
    }
}
