//! # Allowance Flows
//!
//! Delegated spending end to end: grants, adjustments, expiry and the
//! records a `transfer_from` leaves behind.

#[cfg(test)]
mod tests {
    use crate::harness::*;
    use secret_token::prelude::*;

    fn funded_pair() -> TestChain {
        let mut chain = TestChain::new();
        chain.onboard("alice");
        chain.onboard("bob");
        chain.onboard("carol");
        chain.deposit("alice", 1_000_000).unwrap();
        chain
    }

    #[test]
    fn test_delegated_transfer_scenario() {
        let mut chain = funded_pair();
        let bob_before = chain.balance("bob");

        chain.increase_allowance("alice", "bob", 500_000, None).unwrap();
        chain.transfer_from("bob", "alice", "bob", 200_000).unwrap();

        assert_eq!(chain.balance("alice"), 800_000);
        assert_eq!(chain.allowance_amount("alice", "bob"), 300_000);
        assert_eq!(chain.balance("bob"), bob_before + 200_000);

        let alice_txs = chain.history("alice", None, None);
        let bob_txs = chain.history("bob", None, None);
        assert_eq!(alice_txs[0], bob_txs[0]);
        let record = &alice_txs[0];
        assert_eq!(record.from, addr("alice"));
        assert_eq!(record.sender, addr("bob"));
        assert_eq!(record.receiver, addr("bob"));
        assert_eq!(record.coins, Coin::new(200_000, SYMBOL));

        // Carol was not party to it.
        assert!(chain
            .history("carol", None, None)
            .iter()
            .all(|tx| tx.id != record.id));
    }

    #[test]
    fn test_increase_then_decrease_restores_prior() {
        let mut chain = funded_pair();
        chain.increase_allowance("alice", "bob", 1_234, None).unwrap();
        let prior = chain.allowance_amount("alice", "bob");

        chain.increase_allowance("alice", "bob", 500_000, None).unwrap();
        chain.decrease_allowance("alice", "bob", 500_000).unwrap();

        assert_eq!(chain.allowance_amount("alice", "bob"), prior);
    }

    #[test]
    fn test_decrease_below_zero_floors() {
        let mut chain = funded_pair();
        chain.increase_allowance("alice", "bob", 10, None).unwrap();
        chain.decrease_allowance("alice", "bob", 11).unwrap();
        assert_eq!(chain.allowance_amount("alice", "bob"), 0);
    }

    #[test]
    fn test_spend_beyond_allowance_rejected() {
        let mut chain = funded_pair();
        chain.increase_allowance("alice", "bob", 100, None).unwrap();

        let err = rejection(chain.transfer_from("bob", "alice", "carol", 101));

        assert_eq!(err, TokenError::InsufficientAllowance);
        assert_eq!(chain.allowance_amount("alice", "bob"), 100);
        assert_eq!(chain.balance("alice"), 1_000_000);
    }

    #[test]
    fn test_allowance_beyond_balance_rejected_without_spending() {
        let mut chain = funded_pair();
        chain.increase_allowance("alice", "bob", 5_000_000, None).unwrap();

        let err = rejection(chain.transfer_from("bob", "alice", "bob", 2_000_000));

        assert_eq!(err, TokenError::InsufficientFunds);
        assert_eq!(chain.allowance_amount("alice", "bob"), 5_000_000);
    }

    #[test]
    fn test_expiry_boundary() {
        let mut chain = funded_pair();
        let expiration = chain.host.block().time + 100;
        chain
            .increase_allowance("alice", "bob", 1_000, Some(expiration))
            .unwrap();

        chain.host.set_time(expiration - 1);
        chain.transfer_from("bob", "alice", "bob", 10).unwrap();

        chain.host.set_time(expiration);
        let err = rejection(chain.transfer_from("bob", "alice", "bob", 10));
        assert_eq!(err, TokenError::AllowanceExpired);

        match chain.allowance("alice", "bob", "alice") {
            QueryAnswer::Allowance {
                allowance,
                expiration: reported,
                ..
            } => {
                assert_eq!(allowance, Uint128(0));
                assert_eq!(reported, Some(expiration));
            }
            other => panic!("unexpected answer: {other:?}"),
        }
    }

    #[test]
    fn test_increase_after_expiry_starts_from_zero() {
        let mut chain = funded_pair();
        let expiration = chain.host.block().time + 10;
        chain
            .increase_allowance("alice", "bob", 1_000, Some(expiration))
            .unwrap();
        chain.host.advance_time(10);

        let renewed = chain.host.block().time + 1_000;
        chain
            .increase_allowance("alice", "bob", 50, Some(renewed))
            .unwrap();

        assert_eq!(chain.allowance_amount("alice", "bob"), 50);
    }

    #[test]
    fn test_allowance_readable_by_either_party_only() {
        let mut chain = funded_pair();
        chain.increase_allowance("alice", "bob", 77, None).unwrap();

        for reader in ["alice", "bob"] {
            match chain.allowance("alice", "bob", reader) {
                QueryAnswer::Allowance {
                    owner,
                    spender,
                    allowance,
                    ..
                } => {
                    assert_eq!(owner, addr("alice"));
                    assert_eq!(spender, addr("bob"));
                    assert_eq!(allowance, Uint128(77));
                }
                other => panic!("{reader} could not read allowance: {other:?}"),
            }
        }
        assert_eq!(
            chain.allowance("alice", "bob", "carol"),
            QueryAnswer::viewing_key_error()
        );
    }

    #[test]
    fn test_allowance_is_per_spender() {
        let mut chain = funded_pair();
        chain.increase_allowance("alice", "bob", 100, None).unwrap();

        let err = rejection(chain.transfer_from("carol", "alice", "carol", 1));

        assert_eq!(err, TokenError::InsufficientAllowance);
    }
}
