//! # Token Contract Service
//!
//! The contract itself: exhaustive dispatch of every execute and query
//! message onto the domain components.
//!
//! ## Atomicity
//!
//! Each execute runs against a [`StagedStore`] overlay. The overlay's write
//! set is committed to the real store only after the whole operation, and
//! the serialization of its answer, succeeded. Any error drops the overlay,
//! so a failed invocation leaves no trace.
//!
//! ## Response Envelope
//!
//! Execute answers, including error bodies and receiver callbacks, are
//! padded with spaces to a multiple of the configured block size so that
//! payload length does not reveal the operation or its outcome. Query
//! answers are not padded.
//!
//! ## Logging
//!
//! Log lines carry the operation name and outcome kind only. Amounts,
//! balances, addresses, entropy and keys are never logged.

use tracing::{debug, info, instrument, warn};

use crate::adapters::staged::StagedStore;
use crate::algorithms::padding::space_pad;
use crate::algorithms::viewing_key::initial_seed;
use crate::config::{ConfigError, EngineConfig};
use crate::domain::{
    allowance, authenticator, bridge, history, ledger, ContractState, ContractStatusLevel,
    TokenConstants,
};
use crate::errors::{ExecuteError, TokenError};
use crate::msg::{
    ErrorEnvelope, HandleAnswer, HandleMsg, HandleResponse, InitConfig, InitMsg, QueryAnswer,
    QueryMsg, ReceiverHandleMsg, ResponseStatus, Tx,
};
use crate::ports::inbound::TokenContractApi;
use crate::ports::outbound::{LedgerStore, WriteSet};
use serde::Serialize;
use shared_types::{Binary, BlockInfo, CanonicalAddr, Env, HostMsg, Uint128, WasmMsg};

/// Token name length bounds, in characters.
pub const NAME_LEN: std::ops::RangeInclusive<usize> = 3..=30;

/// Symbol length bounds, in ASCII uppercase letters.
pub const SYMBOL_LEN: std::ops::RangeInclusive<usize> = 3..=6;

/// Maximum display decimals.
pub const MAX_DECIMALS: u8 = 18;

/// Execute counters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContractStats {
    /// Invocations committed.
    pub executions_committed: u64,
    /// Invocations rejected (nothing committed).
    pub executions_rejected: u64,
}

/// The token contract over a storage backend.
#[derive(Clone, Debug)]
pub struct TokenContract<S: LedgerStore> {
    config: EngineConfig,
    store: S,
    stats: ContractStats,
}

impl<S: LedgerStore> TokenContract<S> {
    /// Create a contract over `store`.
    pub fn new(store: S, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            store,
            stats: ContractStats::default(),
        })
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Committed state.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Undo the last committed invocation: replace committed state with the
    /// snapshot taken before it and count it as rejected. The host calls
    /// this when a message the invocation emitted fails.
    pub fn revert_invocation(&mut self, snapshot: S) {
        self.store = snapshot;
        self.stats.executions_committed = self.stats.executions_committed.saturating_sub(1);
        self.stats.executions_rejected += 1;
    }

    /// Execute counters.
    #[must_use]
    pub fn stats(&self) -> &ContractStats {
        &self.stats
    }

    /// Parse and execute a JSON message.
    ///
    /// Undecodable input is answered with the same padded error envelope as
    /// any other failure.
    pub fn execute_json(&mut self, env: &Env, raw: &[u8]) -> Result<HandleResponse, ExecuteError> {
        match serde_json::from_slice::<HandleMsg>(raw) {
            Ok(msg) => self.execute(env, msg),
            Err(e) => {
                self.stats.executions_rejected += 1;
                warn!("execute rejected: undecodable message");
                Err(self.error_response(TokenError::ParseError(e.to_string())))
            }
        }
    }

    /// Parse and answer a JSON query, returning the JSON answer.
    pub fn query_json(&self, block: &BlockInfo, raw: &[u8]) -> Result<Binary, TokenError> {
        let msg: QueryMsg =
            serde_json::from_slice(raw).map_err(|e| TokenError::ParseError(e.to_string()))?;
        let answer = self.query(block, msg)?;
        serde_json::to_vec(&answer)
            .map(Binary::new)
            .map_err(|e| TokenError::Serialization(e.to_string()))
    }

    // =========================================================================
    // EXECUTE INTERNALS
    // =========================================================================

    fn try_execute(&mut self, env: &Env, msg: HandleMsg) -> Result<HandleResponse, TokenError> {
        let state = ledger::load_state(&self.store)?;
        if !msg.allowed_at(state.status) {
            return Err(TokenError::ContractStopped(state.status));
        }
        if !msg.accepts_funds() && !env.message.sent_funds.is_empty() {
            return Err(TokenError::InvalidAmount(format!(
                "{} does not accept funds",
                msg.name()
            )));
        }
        let sender = env.message.sender.canonicalize()?;

        let (answer, messages, writes) = {
            let mut staged = StagedStore::new(&self.store);
            let (answer, messages) = self.dispatch(&mut staged, env, &sender, msg)?;
            (answer, messages, staged.into_write_set())
        };
        let data = self.padded(&answer)?;

        self.store.apply(writes)?;
        Ok(HandleResponse { messages, data })
    }

    fn dispatch<T: LedgerStore>(
        &self,
        store: &mut T,
        env: &Env,
        sender: &CanonicalAddr,
        msg: HandleMsg,
    ) -> Result<(HandleAnswer, Vec<HostMsg>), TokenError> {
        let status = ResponseStatus::Success;
        let now = env.block.time;

        let outcome = match msg {
            HandleMsg::Deposit {} => {
                bridge::deposit(
                    store,
                    sender,
                    &env.message.sent_funds,
                    &self.config.native_denom,
                )?;
                (HandleAnswer::Deposit { status }, Vec::new())
            }
            HandleMsg::Redeem { amount } => {
                let release = bridge::redeem(
                    store,
                    &env.contract.address,
                    sender,
                    amount.u128(),
                    &self.config.native_denom,
                )?;
                (HandleAnswer::Redeem { status }, vec![release])
            }
            HandleMsg::Transfer { recipient, amount } => {
                let recipient = recipient.canonicalize()?;
                let symbol = ledger::load_constants(store)?.symbol;
                ledger::transfer(store, sender, sender, &recipient, amount.u128(), &symbol)?;
                (HandleAnswer::Transfer { status }, Vec::new())
            }
            HandleMsg::Send {
                recipient,
                amount,
                msg,
            } => {
                let recipient = recipient.canonicalize()?;
                let symbol = ledger::load_constants(store)?.symbol;
                ledger::transfer(store, sender, sender, &recipient, amount.u128(), &symbol)?;
                let callback = self.receiver_callback(store, sender, sender, &recipient, amount, msg)?;
                (HandleAnswer::Send { status }, callback.into_iter().collect())
            }
            HandleMsg::RegisterReceive { code_hash } => {
                store.set_receiver_code_hash(sender.clone(), code_hash)?;
                (HandleAnswer::RegisterReceive { status }, Vec::new())
            }
            HandleMsg::CreateViewingKey { entropy } => {
                let key = authenticator::create(
                    store,
                    env,
                    sender,
                    &entropy,
                    &self.config.viewing_key_prefix,
                )?;
                (HandleAnswer::CreateViewingKey { key }, Vec::new())
            }
            HandleMsg::SetViewingKey { key } => {
                authenticator::set(store, sender, &key)?;
                (HandleAnswer::SetViewingKey { status }, Vec::new())
            }
            HandleMsg::IncreaseAllowance {
                spender,
                amount,
                expiration,
            } => {
                let spender = spender.canonicalize()?;
                allowance::increase(store, sender, &spender, amount.u128(), expiration, now)?;
                (HandleAnswer::IncreaseAllowance { status }, Vec::new())
            }
            HandleMsg::DecreaseAllowance {
                spender,
                amount,
                expiration,
            } => {
                let spender = spender.canonicalize()?;
                allowance::decrease(store, sender, &spender, amount.u128(), expiration, now)?;
                (HandleAnswer::DecreaseAllowance { status }, Vec::new())
            }
            HandleMsg::TransferFrom {
                owner,
                recipient,
                amount,
            } => {
                let owner = owner.canonicalize()?;
                let recipient = recipient.canonicalize()?;
                let symbol = ledger::load_constants(store)?.symbol;
                allowance::transfer_from(
                    store,
                    sender,
                    &owner,
                    &recipient,
                    amount.u128(),
                    &symbol,
                    now,
                )?;
                (HandleAnswer::TransferFrom { status }, Vec::new())
            }
            HandleMsg::SendFrom {
                owner,
                recipient,
                amount,
                msg,
            } => {
                let owner = owner.canonicalize()?;
                let recipient = recipient.canonicalize()?;
                let symbol = ledger::load_constants(store)?.symbol;
                allowance::transfer_from(
                    store,
                    sender,
                    &owner,
                    &recipient,
                    amount.u128(),
                    &symbol,
                    now,
                )?;
                let callback = self.receiver_callback(store, sender, &owner, &recipient, amount, msg)?;
                (HandleAnswer::SendFrom { status }, callback.into_iter().collect())
            }
            HandleMsg::ChangeAdmin { address } => {
                let mut state = admin_state(store, sender)?;
                state.admin = address.canonicalize()?;
                store.set_state(state)?;
                (HandleAnswer::ChangeAdmin { status }, Vec::new())
            }
            HandleMsg::SetContractStatus { level } => {
                let mut state = admin_state(store, sender)?;
                state.status = level;
                store.set_state(state)?;
                (HandleAnswer::SetContractStatus { status }, Vec::new())
            }
        };
        Ok(outcome)
    }

    /// Callback for a registered receiver, if `recipient` registered one.
    fn receiver_callback<T: LedgerStore>(
        &self,
        store: &T,
        sender: &CanonicalAddr,
        from: &CanonicalAddr,
        recipient: &CanonicalAddr,
        amount: Uint128,
        msg: Option<Binary>,
    ) -> Result<Option<HostMsg>, TokenError> {
        let Some(code_hash) = store.receiver_code_hash(recipient)? else {
            return Ok(None);
        };
        let body = ReceiverHandleMsg::Receive {
            sender: sender.humanize(),
            from: from.humanize(),
            amount,
            msg,
        };
        Ok(Some(HostMsg::Wasm(WasmMsg::Execute {
            contract_addr: recipient.humanize(),
            callback_code_hash: code_hash,
            msg: self.padded(&body)?,
            send: Vec::new(),
        })))
    }

    fn padded<T: Serialize>(&self, value: &T) -> Result<Binary, TokenError> {
        let mut bytes =
            serde_json::to_vec(value).map_err(|e| TokenError::Serialization(e.to_string()))?;
        space_pad(&mut bytes, self.config.response_block_size);
        Ok(Binary::new(bytes))
    }

    fn error_response(&self, error: TokenError) -> ExecuteError {
        let encoded = serde_json::to_vec(&ErrorEnvelope::from(&error)).ok();
        ExecuteError {
            error,
            data: Binary::new(error_body(encoded, self.config.response_block_size)),
        }
    }

    // =========================================================================
    // QUERY INTERNALS
    // =========================================================================

    fn try_query(&self, block: &BlockInfo, msg: QueryMsg) -> Result<QueryAnswer, TokenError> {
        let store = &self.store;
        match msg {
            QueryMsg::TokenInfo {} => {
                let constants = ledger::load_constants(store)?;
                let state = ledger::load_state(store)?;
                Ok(QueryAnswer::TokenInfo {
                    name: constants.name,
                    symbol: constants.symbol,
                    decimals: constants.decimals,
                    total_supply: constants
                        .total_supply_is_public
                        .then_some(Uint128(state.total_supply)),
                })
            }
            QueryMsg::ExchangeRate {} => {
                ledger::load_constants(store)?;
                Ok(QueryAnswer::ExchangeRate {
                    rate: Uint128(1),
                    denom: self.config.native_denom.clone(),
                })
            }
            QueryMsg::Balance { address, key } => {
                let addr = address.canonicalize()?;
                if !authenticator::authenticate(store, &addr, key.as_str())? {
                    return Ok(QueryAnswer::viewing_key_error());
                }
                Ok(QueryAnswer::Balance {
                    amount: Uint128(ledger::balance(store, &addr)?),
                })
            }
            QueryMsg::Allowance {
                owner,
                spender,
                key,
            } => {
                let owner = owner.canonicalize()?;
                let spender = spender.canonicalize()?;
                // Both checks always run.
                let owner_ok = authenticator::authenticate(store, &owner, key.as_str())?;
                let spender_ok = authenticator::authenticate(store, &spender, key.as_str())?;
                if !(owner_ok | spender_ok) {
                    return Ok(QueryAnswer::viewing_key_error());
                }
                let record = allowance::read(store, &owner, &spender)?;
                Ok(QueryAnswer::Allowance {
                    spender: spender.humanize(),
                    owner: owner.humanize(),
                    allowance: Uint128(record.effective_amount(block.time)),
                    expiration: record.expiration,
                })
            }
            QueryMsg::TransferHistory {
                address,
                key,
                page,
                page_size,
            } => {
                let addr = address.canonicalize()?;
                if !authenticator::authenticate(store, &addr, key.as_str())? {
                    return Ok(QueryAnswer::viewing_key_error());
                }
                let page_size = page_size
                    .unwrap_or(self.config.default_page_size)
                    .min(self.config.max_page_size);
                let txs = history::query(store, &addr, page.unwrap_or(0), page_size)?
                    .into_iter()
                    .map(Tx::from)
                    .collect();
                Ok(QueryAnswer::TransferHistory { txs })
            }
        }
    }
}

impl<S: LedgerStore> TokenContractApi for TokenContract<S> {
    #[instrument(skip_all)]
    fn instantiate(&mut self, env: &Env, msg: InitMsg) -> Result<(), TokenError> {
        if self.store.state()?.is_some() {
            warn!("instantiate rejected: already initialized");
            return Err(TokenError::AlreadyInitialized);
        }
        if !env.message.sent_funds.is_empty() {
            return Err(TokenError::InvalidAmount(
                "instantiation does not accept funds".to_string(),
            ));
        }
        validate_init(&msg)?;

        let admin = msg
            .admin
            .as_ref()
            .unwrap_or(&env.message.sender)
            .canonicalize()?;
        let total_supply_is_public = msg
            .config
            .as_ref()
            .is_some_and(InitConfig::public_total_supply);

        let writes = WriteSet {
            constants: Some(TokenConstants {
                name: msg.name,
                symbol: msg.symbol,
                decimals: msg.decimals,
                total_supply_is_public,
            }),
            state: Some(ContractState {
                admin,
                status: ContractStatusLevel::NormalRun,
                total_supply: 0,
                tx_count: 0,
                prng_seed: initial_seed(msg.prng_seed.as_slice()),
                key_nonce: 0,
            }),
            ..WriteSet::default()
        };
        self.store.apply(writes)?;
        info!(total_supply_is_public, "token instantiated");
        Ok(())
    }

    #[instrument(skip_all, fields(op = msg.name()))]
    fn execute(&mut self, env: &Env, msg: HandleMsg) -> Result<HandleResponse, ExecuteError> {
        let op = msg.name();
        match self.try_execute(env, msg) {
            Ok(response) => {
                self.stats.executions_committed += 1;
                info!(op, messages = response.messages.len(), "execute committed");
                Ok(response)
            }
            Err(error) => {
                self.stats.executions_rejected += 1;
                warn!(op, kind = ?error.kind(), "execute rejected");
                Err(self.error_response(error))
            }
        }
    }

    #[instrument(skip_all, fields(query = msg.name()))]
    fn query(&self, block: &BlockInfo, msg: QueryMsg) -> Result<QueryAnswer, TokenError> {
        let result = self.try_query(block, msg);
        if let Err(error) = &result {
            debug!(kind = ?error.kind(), "query rejected");
        }
        result
    }
}

/// Error body sent when the real one cannot be encoded.
const INTERNAL_ERROR_BODY: &[u8] = br#"{"error":{"kind":"internal","msg":"internal error"}}"#;

/// Padded error body, falling back to the fixed internal envelope.
fn error_body(encoded: Option<Vec<u8>>, block_size: usize) -> Vec<u8> {
    let mut body = encoded.unwrap_or_else(|| INTERNAL_ERROR_BODY.to_vec());
    space_pad(&mut body, block_size);
    body
}

/// Load state, requiring `sender` to be the admin.
fn admin_state<T: LedgerStore>(store: &T, sender: &CanonicalAddr) -> Result<ContractState, TokenError> {
    let state = ledger::load_state(store)?;
    if state.admin != *sender {
        return Err(TokenError::Unauthorized);
    }
    Ok(state)
}

/// Check instantiation parameters.
fn validate_init(msg: &InitMsg) -> Result<(), TokenError> {
    if !NAME_LEN.contains(&msg.name.chars().count()) {
        return Err(TokenError::InvalidConfiguration(format!(
            "name must be {} to {} characters",
            NAME_LEN.start(),
            NAME_LEN.end()
        )));
    }
    if !SYMBOL_LEN.contains(&msg.symbol.len()) || !msg.symbol.bytes().all(|b| b.is_ascii_uppercase())
    {
        return Err(TokenError::InvalidConfiguration(format!(
            "symbol must be {} to {} uppercase letters",
            SYMBOL_LEN.start(),
            SYMBOL_LEN.end()
        )));
    }
    if msg.decimals > MAX_DECIMALS {
        return Err(TokenError::InvalidConfiguration(format!(
            "decimals must not exceed {MAX_DECIMALS}"
        )));
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
