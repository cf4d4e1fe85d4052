//! # Coin Bridge Flows
//!
//! Deposit and redeem through the mock host's bank, checking that escrow,
//! ledger and total supply move together.

#[cfg(test)]
mod tests {
    use crate::harness::*;
    use secret_token::prelude::*;

    #[test]
    fn test_deposit_credits_balance_and_escrow() {
        let mut chain = TestChain::new();
        chain.onboard("alice");

        chain.deposit("alice", 1_000_000).unwrap();

        assert_eq!(chain.balance("alice"), 1_000_000);
        assert_eq!(chain.host.escrowed(), 1_000_000);
        assert_eq!(
            chain.host.bank_balance(&addr("alice"), DENOM),
            STARTING_COIN - 1_000_000
        );
        assert_eq!(chain.host.check_invariants(), Ok(()));
    }

    #[test]
    fn test_redeem_beyond_balance_fails_and_changes_nothing() {
        let mut chain = TestChain::new();
        chain.onboard("alice");
        chain.deposit("alice", 500).unwrap();

        let err = rejection(chain.exec("alice", HandleMsg::Redeem { amount: Uint128(501) }));

        assert_eq!(err, TokenError::InsufficientFunds);
        assert_eq!(chain.balance("alice"), 500);
        assert_eq!(chain.host.escrowed(), 500);
    }

    #[test]
    fn test_redeem_returns_native_coin() {
        let mut chain = TestChain::new();
        chain.onboard("alice");
        chain.deposit("alice", 500).unwrap();

        let response = chain
            .exec("alice", HandleMsg::Redeem { amount: Uint128(200) })
            .unwrap();

        assert_eq!(
            response.messages,
            vec![HostMsg::bank_send(
                chain.host.contract_address().clone(),
                addr("alice"),
                Coin::new(200, DENOM),
            )]
        );
        assert_eq!(chain.balance("alice"), 300);
        assert_eq!(
            chain.host.bank_balance(&addr("alice"), DENOM),
            STARTING_COIN - 300
        );
        assert_eq!(chain.host.check_invariants(), Ok(()));
    }

    #[test]
    fn test_full_redeem_empties_escrow() {
        let mut chain = TestChain::new();
        chain.onboard("alice");
        chain.onboard("bob");
        chain.deposit("alice", 700).unwrap();
        chain.transfer("alice", "bob", 300).unwrap();

        chain.exec("alice", HandleMsg::Redeem { amount: Uint128(400) }).unwrap();
        chain.exec("bob", HandleMsg::Redeem { amount: Uint128(300) }).unwrap();

        assert_eq!(chain.host.escrowed(), 0);
        assert_eq!(chain.host.bank_balance(&addr("bob"), DENOM), STARTING_COIN + 300);
        assert_eq!(chain.host.check_invariants(), Ok(()));
    }

    #[test]
    fn test_foreign_denom_deposit_is_refunded() {
        let mut chain = TestChain::new();
        chain.onboard("alice");
        chain.host.fund(&addr("alice"), Coin::new(50, "uatom"));

        let result = chain.host.execute(
            &addr("alice"),
            HandleMsg::Deposit {},
            &[Coin::new(10, DENOM), Coin::new(50, "uatom")],
        );

        assert!(matches!(rejection(result), TokenError::InvalidAmount(_)));
        assert_eq!(chain.host.bank_balance(&addr("alice"), "uatom"), 50);
        assert_eq!(chain.host.bank_balance(&addr("alice"), DENOM), STARTING_COIN);
        assert_eq!(chain.balance("alice"), 0);
    }

    #[test]
    fn test_funds_attached_to_transfer_are_refunded() {
        let mut chain = TestChain::new();
        chain.onboard("alice");
        chain.deposit("alice", 100).unwrap();

        let result = chain.host.execute(
            &addr("alice"),
            HandleMsg::Transfer {
                recipient: addr("bob"),
                amount: Uint128(10),
            },
            &[Coin::new(99, DENOM)],
        );

        assert!(matches!(rejection(result), TokenError::InvalidAmount(_)));
        assert_eq!(chain.balance("alice"), 100);
        assert_eq!(chain.host.escrowed(), 100);
    }

    #[test]
    fn test_deposit_beyond_bank_never_reaches_contract() {
        let mut chain = TestChain::new();
        chain.onboard("alice");

        let result = chain.deposit("alice", STARTING_COIN + 1);

        assert!(matches!(result, Err(HostError::EscrowFailed { .. })));
        assert_eq!(chain.balance("alice"), 0);
    }

    #[test]
    fn test_token_info_supply_follows_visibility() {
        let mut public = TestChain::with_public_supply(true);
        public.onboard("alice");
        public.deposit("alice", 42).unwrap();
        match public.query(QueryMsg::TokenInfo {}) {
            QueryAnswer::TokenInfo {
                symbol,
                decimals,
                total_supply,
                ..
            } => {
                assert_eq!(symbol, SYMBOL);
                assert_eq!(decimals, 6);
                assert_eq!(total_supply, Some(Uint128(42)));
            }
            other => panic!("unexpected answer: {other:?}"),
        }

        let mut hidden = TestChain::new();
        hidden.onboard("alice");
        hidden.deposit("alice", 42).unwrap();
        let raw = hidden.host.query_json(br#"{"token_info":{}}"#).unwrap();
        let value: serde_json::Value = serde_json::from_slice(raw.as_slice()).unwrap();
        assert!(value["token_info"].get("total_supply").is_none());
    }

    #[test]
    fn test_exchange_rate_is_one_to_one() {
        let chain = TestChain::new();
        let raw = chain.host.query_json(br#"{"exchange_rate":{}}"#).unwrap();
        let value: serde_json::Value = serde_json::from_slice(raw.as_slice()).unwrap();
        assert_eq!(value["exchange_rate"]["rate"], "1");
        assert_eq!(value["exchange_rate"]["denom"], DENOM);
    }
}
