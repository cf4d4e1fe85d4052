//! # Wire Schema
//!
//! Messages the host hands to the contract and the answers it returns. Every
//! message kind is a variant of a closed enum, so dispatch is an exhaustive
//! `match`. 128-bit amounts are decimal strings on the wire.

use crate::domain::{ContractStatusLevel, StoredTx, ViewingKey};
use crate::errors::{ErrorKind, TokenError, VIEWING_KEY_ERROR_MSG};
use serde::{Deserialize, Serialize};
use shared_types::{Binary, Coin, HostMsg, HumanAddr, Uint128};

// =============================================================================
// INSTANTIATE
// =============================================================================

/// Instantiation parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitMsg {
    /// Token name, 3 to 30 characters.
    pub name: String,
    /// Admin account; defaults to the instantiating sender.
    #[serde(default)]
    pub admin: Option<HumanAddr>,
    /// Ticker, 3 to 6 ASCII uppercase letters.
    pub symbol: String,
    /// Display decimals, at most 18.
    pub decimals: u8,
    /// Seed material for viewing-key derivation.
    pub prng_seed: Binary,
    /// Optional behaviour switches.
    #[serde(default)]
    pub config: Option<InitConfig>,
}

/// Optional instantiation switches.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitConfig {
    /// Reveal the total supply in `token_info`.
    #[serde(default)]
    pub public_total_supply: Option<bool>,
}

impl InitConfig {
    /// Whether the total supply is public (default: hidden).
    #[must_use]
    pub fn public_total_supply(&self) -> bool {
        self.public_total_supply.unwrap_or(false)
    }
}

// =============================================================================
// EXECUTE
// =============================================================================

/// State-changing messages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleMsg {
    // Coin bridge
    /// Burn tokens and release the same amount of native coin.
    Redeem {
        /// Tokens to burn.
        amount: Uint128,
    },
    /// Mint tokens for the native coin attached to the call.
    Deposit {},

    // Ledger
    /// Move tokens to another account.
    Transfer {
        /// Receiving account.
        recipient: HumanAddr,
        /// Tokens to move.
        amount: Uint128,
    },
    /// Transfer, then notify the recipient if it registered a code hash.
    Send {
        /// Receiving account.
        recipient: HumanAddr,
        /// Tokens to move.
        amount: Uint128,
        /// Opaque payload forwarded in the callback.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        msg: Option<Binary>,
    },
    /// Register the caller as a receiver of `send` callbacks.
    RegisterReceive {
        /// Code hash callbacks are addressed with.
        code_hash: String,
    },

    // Viewing keys
    /// Derive a fresh viewing key for the caller.
    CreateViewingKey {
        /// Caller-supplied entropy.
        entropy: String,
    },
    /// Set a caller-chosen viewing key.
    SetViewingKey {
        /// The new key.
        key: ViewingKey,
    },

    // Allowances
    /// Raise the allowance granted to `spender`.
    IncreaseAllowance {
        /// Account allowed to spend.
        spender: HumanAddr,
        /// Amount added.
        amount: Uint128,
        /// New expiration (unix seconds); keeps the old one if absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expiration: Option<u64>,
    },
    /// Lower the allowance granted to `spender`, flooring at zero.
    DecreaseAllowance {
        /// Account allowed to spend.
        spender: HumanAddr,
        /// Amount removed.
        amount: Uint128,
        /// New expiration (unix seconds); keeps the old one if absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expiration: Option<u64>,
    },
    /// Spend from `owner`'s balance under an allowance.
    TransferFrom {
        /// Account whose balance is debited.
        owner: HumanAddr,
        /// Receiving account.
        recipient: HumanAddr,
        /// Tokens to move.
        amount: Uint128,
    },
    /// `transfer_from` plus the receiver callback.
    SendFrom {
        /// Account whose balance is debited.
        owner: HumanAddr,
        /// Receiving account.
        recipient: HumanAddr,
        /// Tokens to move.
        amount: Uint128,
        /// Opaque payload forwarded in the callback.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        msg: Option<Binary>,
    },

    // Administration
    /// Hand the admin role to another account.
    ChangeAdmin {
        /// New admin.
        address: HumanAddr,
    },
    /// Change the operating level.
    SetContractStatus {
        /// New level.
        level: ContractStatusLevel,
    },
}

impl HandleMsg {
    /// Wire name of the message, also the key of its answer.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Redeem { .. } => "redeem",
            Self::Deposit {} => "deposit",
            Self::Transfer { .. } => "transfer",
            Self::Send { .. } => "send",
            Self::RegisterReceive { .. } => "register_receive",
            Self::CreateViewingKey { .. } => "create_viewing_key",
            Self::SetViewingKey { .. } => "set_viewing_key",
            Self::IncreaseAllowance { .. } => "increase_allowance",
            Self::DecreaseAllowance { .. } => "decrease_allowance",
            Self::TransferFrom { .. } => "transfer_from",
            Self::SendFrom { .. } => "send_from",
            Self::ChangeAdmin { .. } => "change_admin",
            Self::SetContractStatus { .. } => "set_contract_status",
        }
    }

    /// True for operations only the admin may run.
    #[must_use]
    pub fn is_admin_op(&self) -> bool {
        matches!(self, Self::ChangeAdmin { .. } | Self::SetContractStatus { .. })
    }

    /// Whether the message may run at the given contract status.
    #[must_use]
    pub fn allowed_at(&self, status: ContractStatusLevel) -> bool {
        match status {
            ContractStatusLevel::NormalRun => true,
            ContractStatusLevel::StopAllButRedeems => {
                self.is_admin_op() || matches!(self, Self::Redeem { .. })
            }
            ContractStatusLevel::StopAll => self.is_admin_op(),
        }
    }

    /// True if the message legitimately carries native coin.
    #[must_use]
    pub fn accepts_funds(&self) -> bool {
        matches!(self, Self::Deposit {})
    }
}

/// Outcome marker of an execute answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    /// The operation committed.
    Success,
}

/// Execute answers, serialized then padded into `HandleResponse::data`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleAnswer {
    /// `deposit` committed.
    Deposit {
        /// Outcome.
        status: ResponseStatus,
    },
    /// `redeem` committed.
    Redeem {
        /// Outcome.
        status: ResponseStatus,
    },
    /// `transfer` committed.
    Transfer {
        /// Outcome.
        status: ResponseStatus,
    },
    /// `send` committed.
    Send {
        /// Outcome.
        status: ResponseStatus,
    },
    /// `register_receive` committed.
    RegisterReceive {
        /// Outcome.
        status: ResponseStatus,
    },
    /// `create_viewing_key` committed.
    CreateViewingKey {
        /// The derived key, shown to its owner only here.
        key: ViewingKey,
    },
    /// `set_viewing_key` committed.
    SetViewingKey {
        /// Outcome.
        status: ResponseStatus,
    },
    /// `increase_allowance` committed.
    IncreaseAllowance {
        /// Outcome.
        status: ResponseStatus,
    },
    /// `decrease_allowance` committed.
    DecreaseAllowance {
        /// Outcome.
        status: ResponseStatus,
    },
    /// `transfer_from` committed.
    TransferFrom {
        /// Outcome.
        status: ResponseStatus,
    },
    /// `send_from` committed.
    SendFrom {
        /// Outcome.
        status: ResponseStatus,
    },
    /// `change_admin` committed.
    ChangeAdmin {
        /// Outcome.
        status: ResponseStatus,
    },
    /// `set_contract_status` committed.
    SetContractStatus {
        /// Outcome.
        status: ResponseStatus,
    },
}

/// What a successful execute hands back to the host.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HandleResponse {
    /// Effects the host runs in the same atomic unit.
    pub messages: Vec<HostMsg>,
    /// Padded answer body.
    pub data: Binary,
}

/// Failure body of an execute: `{"error":{"kind":..,"msg":..}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// The failure.
    pub error: ErrorBody,
}

/// Kind and caller-safe message of a failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error taxonomy name.
    pub kind: ErrorKind,
    /// Fixed, caller-safe text.
    pub msg: String,
}

impl From<&TokenError> for ErrorEnvelope {
    fn from(error: &TokenError) -> Self {
        Self {
            error: ErrorBody {
                kind: error.kind(),
                msg: error.public_message(),
            },
        }
    }
}

/// Callback delivered to a registered receiver after `send` / `send_from`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiverHandleMsg {
    /// Tokens arrived at the receiver.
    Receive {
        /// Account that initiated the transfer.
        sender: HumanAddr,
        /// Account whose balance was debited.
        from: HumanAddr,
        /// Tokens received.
        amount: Uint128,
        /// Payload the sender attached.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        msg: Option<Binary>,
    },
}

// =============================================================================
// QUERY
// =============================================================================

/// Read-only queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// Public token metadata.
    TokenInfo {},
    /// Fixed 1:1 rate against the native coin.
    ExchangeRate {},
    /// Balance of `address`, gated by its viewing key.
    Balance {
        /// Account queried.
        address: HumanAddr,
        /// Viewing key of `address`.
        key: ViewingKey,
    },
    /// Allowance `owner` granted `spender`.
    Allowance {
        /// Granting account.
        owner: HumanAddr,
        /// Spending account.
        spender: HumanAddr,
        /// Viewing key of either party.
        key: ViewingKey,
    },
    /// Page of transfers `address` took part in, newest first.
    TransferHistory {
        /// Account queried.
        address: HumanAddr,
        /// Viewing key of `address`.
        key: ViewingKey,
        /// Zero-based page; defaults to 0.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        page: Option<u32>,
        /// Records per page; defaults to the configured size.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        page_size: Option<u32>,
    },
}

impl QueryMsg {
    /// Wire name of the query.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::TokenInfo {} => "token_info",
            Self::ExchangeRate {} => "exchange_rate",
            Self::Balance { .. } => "balance",
            Self::Allowance { .. } => "allowance",
            Self::TransferHistory { .. } => "transfer_history",
        }
    }
}

/// Query answers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryAnswer {
    /// Token metadata.
    TokenInfo {
        /// Token name.
        name: String,
        /// Ticker.
        symbol: String,
        /// Display decimals.
        decimals: u8,
        /// Present only if the supply was made public at instantiation.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        total_supply: Option<Uint128>,
    },
    /// Exchange rate against the native coin.
    ExchangeRate {
        /// Always 1.
        rate: Uint128,
        /// Native denomination.
        denom: String,
    },
    /// An account balance.
    Balance {
        /// Tokens held.
        amount: Uint128,
    },
    /// An allowance record.
    Allowance {
        /// Spending account.
        spender: HumanAddr,
        /// Granting account.
        owner: HumanAddr,
        /// Amount still spendable (0 once expired).
        allowance: Uint128,
        /// Expiration in unix seconds, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expiration: Option<u64>,
    },
    /// A page of history.
    TransferHistory {
        /// Transfers, newest first.
        txs: Vec<Tx>,
    },
    /// Wrong or unset viewing key.
    ViewingKeyError {
        /// Always [`VIEWING_KEY_ERROR_MSG`].
        msg: String,
    },
}

impl QueryAnswer {
    /// The uniform answer for a wrong or unset viewing key.
    #[must_use]
    pub fn viewing_key_error() -> Self {
        Self::ViewingKeyError {
            msg: VIEWING_KEY_ERROR_MSG.to_string(),
        }
    }
}

/// A transfer as shown in history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tx {
    /// Sequential id, starting at 1.
    pub id: u64,
    /// Account debited.
    pub from: HumanAddr,
    /// Account that ran the transfer.
    pub sender: HumanAddr,
    /// Account credited.
    pub receiver: HumanAddr,
    /// Amount, denominated in the token symbol.
    pub coins: Coin,
}

impl From<StoredTx> for Tx {
    fn from(tx: StoredTx) -> Self {
        Self {
            id: tx.id,
            from: tx.from.humanize(),
            sender: tx.sender.humanize(),
            receiver: tx.receiver.humanize(),
            coins: Coin::new(tx.amount, tx.denom),
        }
    }
}
