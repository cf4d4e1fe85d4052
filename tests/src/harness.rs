//! # Test Harness
//!
//! `TestChain` hosts one instantiated token and gives every named account a
//! deterministic viewing key, so scenarios read like the flows they test.

use secret_token::prelude::*;

/// Native denomination of the mock chain.
pub const DENOM: &str = "uscrt";

/// Token symbol, also the denom of history records.
pub const SYMBOL: &str = "SSCRT";

/// Native coin every account starts with.
pub const STARTING_COIN: u128 = 100_000_000;

/// Admin account the token is instantiated by.
pub const ADMIN: &str = "admin";

/// Route test logs through the libtest writer; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Human address of a named account.
pub fn addr(name: &str) -> HumanAddr {
    HumanAddr::from(name)
}

/// The viewing key `set_key` installs for `name`.
pub fn key(name: &str) -> ViewingKey {
    ViewingKey::new(format!("vk-{name}"))
}

/// A hosted token and its chain.
pub struct TestChain {
    pub host: MockHost,
}

impl Default for TestChain {
    fn default() -> Self {
        Self::new()
    }
}

impl TestChain {
    /// Token with a hidden total supply.
    pub fn new() -> Self {
        Self::with_public_supply(false)
    }

    /// Token with the total supply visibility chosen.
    pub fn with_public_supply(public_total_supply: bool) -> Self {
        init_tracing();
        let mut host = MockHost::new(EngineConfig::default()).expect("default config is valid");
        host.instantiate(
            &addr(ADMIN),
            InitMsg {
                name: "Secret SCRT".to_string(),
                admin: None,
                symbol: SYMBOL.to_string(),
                decimals: 6,
                prng_seed: Binary::new(b"token-tests".to_vec()),
                config: Some(InitConfig {
                    public_total_supply: Some(public_total_supply),
                }),
            },
        )
        .expect("instantiate should succeed");
        Self { host }
    }

    /// Give `who` native coin and install their viewing key.
    pub fn onboard(&mut self, who: &str) {
        self.host.fund(&addr(who), Coin::new(STARTING_COIN, DENOM));
        self.set_key(who);
    }

    /// Install `key(who)` as `who`'s viewing key.
    pub fn set_key(&mut self, who: &str) {
        self.exec(who, HandleMsg::SetViewingKey { key: key(who) })
            .expect("set_viewing_key should succeed");
    }

    /// Execute without funds.
    pub fn exec(&mut self, who: &str, msg: HandleMsg) -> Result<HandleResponse, HostError> {
        self.host.execute(&addr(who), msg, &[])
    }

    /// Deposit `amount` native coin for `who`.
    pub fn deposit(&mut self, who: &str, amount: u128) -> Result<HandleResponse, HostError> {
        self.host
            .execute(&addr(who), HandleMsg::Deposit {}, &[Coin::new(amount, DENOM)])
    }

    /// Transfer from `from` to `to`.
    pub fn transfer(&mut self, from: &str, to: &str, amount: u128) -> Result<HandleResponse, HostError> {
        self.exec(
            from,
            HandleMsg::Transfer {
                recipient: addr(to),
                amount: Uint128(amount),
            },
        )
    }

    /// Raise `spender`'s allowance over `owner`'s balance.
    pub fn increase_allowance(
        &mut self,
        owner: &str,
        spender: &str,
        amount: u128,
        expiration: Option<u64>,
    ) -> Result<HandleResponse, HostError> {
        self.exec(
            owner,
            HandleMsg::IncreaseAllowance {
                spender: addr(spender),
                amount: Uint128(amount),
                expiration,
            },
        )
    }

    /// Lower `spender`'s allowance over `owner`'s balance.
    pub fn decrease_allowance(
        &mut self,
        owner: &str,
        spender: &str,
        amount: u128,
    ) -> Result<HandleResponse, HostError> {
        self.exec(
            owner,
            HandleMsg::DecreaseAllowance {
                spender: addr(spender),
                amount: Uint128(amount),
                expiration: None,
            },
        )
    }

    /// `spender` moves `owner`'s tokens to `recipient`.
    pub fn transfer_from(
        &mut self,
        spender: &str,
        owner: &str,
        recipient: &str,
        amount: u128,
    ) -> Result<HandleResponse, HostError> {
        self.exec(
            spender,
            HandleMsg::TransferFrom {
                owner: addr(owner),
                recipient: addr(recipient),
                amount: Uint128(amount),
            },
        )
    }

    /// Balance of `who`, read with their own key.
    pub fn balance(&self, who: &str) -> u128 {
        match self.query(QueryMsg::Balance {
            address: addr(who),
            key: key(who),
        }) {
            QueryAnswer::Balance { amount } => amount.u128(),
            other => panic!("balance query for {who} failed: {other:?}"),
        }
    }

    /// Allowance of `spender` over `owner`, read with `reader`'s key.
    pub fn allowance(&self, owner: &str, spender: &str, reader: &str) -> QueryAnswer {
        self.query(QueryMsg::Allowance {
            owner: addr(owner),
            spender: addr(spender),
            key: key(reader),
        })
    }

    /// Allowance amount of `spender` over `owner`, read with the owner's key.
    pub fn allowance_amount(&self, owner: &str, spender: &str) -> u128 {
        match self.allowance(owner, spender, owner) {
            QueryAnswer::Allowance { allowance, .. } => allowance.u128(),
            other => panic!("allowance query failed: {other:?}"),
        }
    }

    /// One page of `who`'s history, read with their own key.
    pub fn history(&self, who: &str, page: Option<u32>, page_size: Option<u32>) -> Vec<Tx> {
        match self.query(QueryMsg::TransferHistory {
            address: addr(who),
            key: key(who),
            page,
            page_size,
        }) {
            QueryAnswer::TransferHistory { txs } => txs,
            other => panic!("history query for {who} failed: {other:?}"),
        }
    }

    /// Query at the current block; query failures panic.
    pub fn query(&self, msg: QueryMsg) -> QueryAnswer {
        self.host.query(msg).expect("query should not fail")
    }
}

/// Decode the padded answer of a successful execute.
pub fn answer(response: &HandleResponse) -> HandleAnswer {
    serde_json::from_slice(response.data.as_slice()).expect("answer should be valid JSON")
}

/// The engine error behind a rejected execute.
pub fn rejection(result: Result<HandleResponse, HostError>) -> TokenError {
    match result {
        Err(HostError::Contract(e)) => e.error,
        other => panic!("expected contract rejection, got {other:?}"),
    }
}
