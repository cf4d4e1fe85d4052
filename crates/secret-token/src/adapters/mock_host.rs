//! # Mock Host
//!
//! Stands in for the chain around the contract:
//!
//! - a native bank holding every account's coin, including the contract's
//!   escrow
//! - a block clock (one block per invocation; time moves only when told)
//! - per-invocation randomness drawn from the OS-seeded thread RNG
//!
//! An invocation is all-or-nothing across contract and bank. Attached coin
//! is escrowed before the contract runs and refunded if it fails. Messages
//! the contract emits run afterwards; if one fails, bank and contract state
//! are both rolled back.

use crate::adapters::memory_store::InMemoryStore;
use crate::config::{ConfigError, EngineConfig};
use crate::domain::{check_ledger_invariants, InvariantViolation};
use crate::errors::{ExecuteError, HostError, TokenError};
use crate::msg::{HandleMsg, HandleResponse, InitMsg, QueryAnswer, QueryMsg};
use crate::ports::inbound::TokenContractApi;
use crate::ports::outbound::LedgerStore;
use crate::service::TokenContract;
use rand::RngCore;
use shared_types::{
    BankMsg, Binary, BlockInfo, Coin, ContractInfo, Env, HostMsg, HumanAddr, MessageInfo, WasmMsg,
};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Address the token contract is deployed at.
pub const CONTRACT_ADDRESS: &str = "secret-token-contract";

/// Code hash the token contract is deployed with.
pub const CONTRACT_CODE_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// Chain id of the mock chain.
pub const CHAIN_ID: &str = "mock-secret-1";

/// Clock at genesis (unix seconds).
pub const GENESIS_TIME: u64 = 1_600_000_000;

/// A receiver callback the host delivered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveredCallback {
    /// Receiving contract.
    pub contract_addr: HumanAddr,
    /// Code hash it registered.
    pub code_hash: String,
    /// Padded callback body.
    pub msg: Binary,
}

/// In-process chain hosting one token contract.
#[derive(Debug)]
pub struct MockHost {
    contract: TokenContract<InMemoryStore>,
    contract_info: ContractInfo,
    block: BlockInfo,
    /// Native bank keyed by (lowercased address, denom).
    bank: HashMap<(String, String), u128>,
    callbacks: Vec<DeliveredCallback>,
}

impl MockHost {
    /// Deploy a fresh (not yet instantiated) contract.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            contract: TokenContract::new(InMemoryStore::new(), config)?,
            contract_info: ContractInfo {
                address: HumanAddr::from(CONTRACT_ADDRESS),
                code_hash: CONTRACT_CODE_HASH.to_string(),
            },
            block: BlockInfo {
                height: 1,
                time: GENESIS_TIME,
                chain_id: CHAIN_ID.to_string(),
                random: None,
            },
            bank: HashMap::new(),
            callbacks: Vec::new(),
        })
    }

    /// The hosted contract.
    #[must_use]
    pub fn contract(&self) -> &TokenContract<InMemoryStore> {
        &self.contract
    }

    /// Address of the hosted contract.
    #[must_use]
    pub fn contract_address(&self) -> &HumanAddr {
        &self.contract_info.address
    }

    /// Current block.
    #[must_use]
    pub fn block(&self) -> &BlockInfo {
        &self.block
    }

    /// Move the clock forward.
    pub fn advance_time(&mut self, seconds: u64) {
        self.block.time = self.block.time.saturating_add(seconds);
    }

    /// Set the clock.
    pub fn set_time(&mut self, time: u64) {
        self.block.time = time;
    }

    // =========================================================================
    // BANK
    // =========================================================================

    /// Give `addr` native coin out of thin air (genesis allocation).
    pub fn fund(&mut self, addr: &HumanAddr, coin: Coin) {
        let entry = self.bank.entry(bank_key(addr, &coin.denom)).or_default();
        *entry = entry.saturating_add(coin.amount.u128());
    }

    /// Bank balance of `addr` in `denom`.
    #[must_use]
    pub fn bank_balance(&self, addr: &HumanAddr, denom: &str) -> u128 {
        self.bank
            .get(&bank_key(addr, denom))
            .copied()
            .unwrap_or_default()
    }

    /// Native coin held in escrow by the contract.
    #[must_use]
    pub fn escrowed(&self) -> u128 {
        self.bank_balance(
            &self.contract_info.address,
            &self.contract.config().native_denom,
        )
    }

    /// Check supply, balances and escrow agree.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let store = self.contract.store();
        let total_supply = store
            .state()
            .ok()
            .flatten()
            .map_or(0, |state| state.total_supply);
        check_ledger_invariants(total_supply, store.sum_balances(), self.escrowed())
    }

    // =========================================================================
    // INVOCATIONS
    // =========================================================================

    /// Instantiate the contract.
    pub fn instantiate(&mut self, sender: &HumanAddr, msg: InitMsg) -> Result<(), HostError> {
        let env = self.open_block(sender, &[]);
        self.contract
            .instantiate(&env, msg)
            .map_err(HostError::Instantiate)
    }

    /// Execute a typed message with `funds` attached.
    pub fn execute(
        &mut self,
        sender: &HumanAddr,
        msg: HandleMsg,
        funds: &[Coin],
    ) -> Result<HandleResponse, HostError> {
        self.run(sender, funds, |contract, env| contract.execute(env, msg))
    }

    /// Execute a raw JSON message with `funds` attached.
    pub fn execute_json(
        &mut self,
        sender: &HumanAddr,
        raw: &[u8],
        funds: &[Coin],
    ) -> Result<HandleResponse, HostError> {
        self.run(sender, funds, |contract, env| contract.execute_json(env, raw))
    }

    /// Query at the current block.
    pub fn query(&self, msg: QueryMsg) -> Result<QueryAnswer, TokenError> {
        self.contract.query(&self.block, msg)
    }

    /// Raw JSON query at the current block.
    pub fn query_json(&self, raw: &[u8]) -> Result<Binary, TokenError> {
        self.contract.query_json(&self.block, raw)
    }

    /// Callbacks delivered so far.
    #[must_use]
    pub fn callbacks(&self) -> &[DeliveredCallback] {
        &self.callbacks
    }

    /// Move coin out of the contract's escrow behind its back.
    #[cfg(test)]
    fn drain_escrow(&mut self, to: &HumanAddr) {
        let contract = self.contract_info.address.clone();
        let denom = self.contract.config().native_denom.clone();
        let coin = Coin::new(self.escrowed(), denom);
        let _ = transfer_coin(&mut self.bank, &contract, to, &coin);
    }

    fn run<F>(
        &mut self,
        sender: &HumanAddr,
        funds: &[Coin],
        call: F,
    ) -> Result<HandleResponse, HostError>
    where
        F: FnOnce(&mut TokenContract<InMemoryStore>, &Env) -> Result<HandleResponse, ExecuteError>,
    {
        let env = self.open_block(sender, funds);
        let bank_snapshot = self.bank.clone();
        let store_snapshot = self.contract.store().clone();
        let delivered = self.callbacks.len();

        self.escrow(sender, funds)?;

        let response = match call(&mut self.contract, &env) {
            Ok(response) => response,
            Err(e) => {
                self.bank = bank_snapshot;
                return Err(HostError::Contract(e));
            }
        };

        if let Err(e) = self.run_messages(&response.messages) {
            warn!(error = %e, "host message failed, reverting invocation");
            self.bank = bank_snapshot;
            self.contract.revert_invocation(store_snapshot);
            self.callbacks.truncate(delivered);
            return Err(e);
        }
        Ok(response)
    }

    fn open_block(&mut self, sender: &HumanAddr, funds: &[Coin]) -> Env {
        let mut random = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut random);
        self.block.height += 1;
        self.block.random = Some(Binary::new(random.to_vec()));
        debug!(height = self.block.height, "block opened");

        Env {
            block: self.block.clone(),
            message: MessageInfo {
                sender: sender.clone(),
                sent_funds: funds.to_vec(),
            },
            contract: self.contract_info.clone(),
        }
    }

    /// Move attached coin into the contract; all-or-nothing.
    fn escrow(&mut self, sender: &HumanAddr, funds: &[Coin]) -> Result<(), HostError> {
        let contract = self.contract_info.address.clone();
        let mut staged = self.bank.clone();
        for coin in funds {
            transfer_coin(&mut staged, sender, &contract, coin).map_err(|_| {
                HostError::EscrowFailed {
                    required: coin.amount.u128(),
                    denom: coin.denom.clone(),
                }
            })?;
        }
        self.bank = staged;
        Ok(())
    }

    fn run_messages(&mut self, messages: &[HostMsg]) -> Result<(), HostError> {
        for message in messages {
            match message {
                HostMsg::Bank(BankMsg::Send {
                    from_address,
                    to_address,
                    amount,
                }) => {
                    if bank_key(from_address, "") != bank_key(&self.contract_info.address, "") {
                        return Err(HostError::MessageFailed(
                            "contract may only spend its own funds".to_string(),
                        ));
                    }
                    for coin in amount {
                        transfer_coin(&mut self.bank, from_address, to_address, coin)?;
                    }
                }
                HostMsg::Wasm(WasmMsg::Execute {
                    contract_addr,
                    callback_code_hash,
                    msg,
                    ..
                }) => {
                    self.callbacks.push(DeliveredCallback {
                        contract_addr: contract_addr.clone(),
                        code_hash: callback_code_hash.clone(),
                        msg: msg.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn bank_key(addr: &HumanAddr, denom: &str) -> (String, String) {
    (addr.as_str().to_ascii_lowercase(), denom.to_string())
}

fn transfer_coin(
    bank: &mut HashMap<(String, String), u128>,
    from: &HumanAddr,
    to: &HumanAddr,
    coin: &Coin,
) -> Result<(), HostError> {
    let amount = coin.amount.u128();
    let from_key = bank_key(from, &coin.denom);
    let available = bank.get(&from_key).copied().unwrap_or_default();
    let remaining = available.checked_sub(amount).ok_or_else(|| {
        HostError::MessageFailed(format!("insufficient {} in {from}", coin.denom))
    })?;
    bank.insert(from_key, remaining);

    let to_entry = bank.entry(bank_key(to, &coin.denom)).or_default();
    *to_entry = to_entry
        .checked_add(amount)
        .ok_or_else(|| HostError::MessageFailed("bank balance overflow".to_string()))?;
    Ok(())
}
