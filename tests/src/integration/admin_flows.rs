//! # Administration Flows
//!
//! Instantiation validation, admin hand-over and contract status gating.

#[cfg(test)]
mod tests {
    use crate::harness::*;
    use secret_token::prelude::*;

    fn set_status(chain: &mut TestChain, who: &str, level: ContractStatusLevel) -> Result<HandleResponse, HostError> {
        chain.exec(who, HandleMsg::SetContractStatus { level })
    }

    fn init_msg(name: &str, symbol: &str, decimals: u8) -> InitMsg {
        InitMsg {
            name: name.to_string(),
            admin: None,
            symbol: symbol.to_string(),
            decimals,
            prng_seed: Binary::new(vec![7u8; 32]),
            config: None,
        }
    }

    fn instantiate(msg: InitMsg) -> Result<(), HostError> {
        let mut host = MockHost::new(EngineConfig::default()).unwrap();
        host.instantiate(&addr(ADMIN), msg)
    }

    #[test]
    fn test_instantiate_bounds() {
        assert!(instantiate(init_msg("Tok", "TOK", 0)).is_ok());
        assert!(instantiate(init_msg(&"n".repeat(30), "ABCDEF", 18)).is_ok());

        for bad in [
            init_msg("To", "TOK", 6),
            init_msg(&"n".repeat(31), "TOK", 6),
            init_msg("Token", "TK", 6),
            init_msg("Token", "TOOLONG", 6),
            init_msg("Token", "tok", 6),
            init_msg("Token", "TOK", 19),
        ] {
            assert!(matches!(
                instantiate(bad),
                Err(HostError::Instantiate(TokenError::InvalidConfiguration(_)))
            ));
        }
    }

    #[test]
    fn test_instantiate_twice_rejected() {
        let mut chain = TestChain::new();
        let result = chain.host.instantiate(&addr(ADMIN), init_msg("Other", "OTH", 6));
        assert_eq!(
            result,
            Err(HostError::Instantiate(TokenError::AlreadyInitialized))
        );
    }

    #[test]
    fn test_uninstantiated_contract_rejects_everything() {
        let mut host = MockHost::new(EngineConfig::default()).unwrap();
        let result = host.execute(
            &addr("alice"),
            HandleMsg::SetViewingKey { key: key("alice") },
            &[],
        );
        assert!(matches!(
            result,
            Err(HostError::Contract(ExecuteError {
                error: TokenError::NotInitialized,
                ..
            }))
        ));
        assert_eq!(
            host.query(QueryMsg::TokenInfo {}),
            Err(TokenError::NotInitialized)
        );
    }

    #[test]
    fn test_stop_all_blocks_everything_but_admin() {
        let mut chain = TestChain::new();
        chain.onboard("alice");
        chain.deposit("alice", 100).unwrap();
        set_status(&mut chain, ADMIN, ContractStatusLevel::StopAll).unwrap();

        for msg in [
            HandleMsg::Redeem { amount: Uint128(1) },
            HandleMsg::SetViewingKey { key: key("alice") },
            HandleMsg::Transfer {
                recipient: addr("bob"),
                amount: Uint128(1),
            },
        ] {
            assert_eq!(
                rejection(chain.exec("alice", msg)),
                TokenError::ContractStopped(ContractStatusLevel::StopAll)
            );
        }

        // Queries keep working.
        assert_eq!(chain.balance("alice"), 100);

        set_status(&mut chain, ADMIN, ContractStatusLevel::NormalRun).unwrap();
        chain.transfer("alice", "bob", 1).unwrap();
    }

    #[test]
    fn test_change_admin_hands_over_control() {
        let mut chain = TestChain::new();

        chain
            .exec(ADMIN, HandleMsg::ChangeAdmin { address: addr("ops") })
            .unwrap();

        assert_eq!(
            rejection(set_status(&mut chain, ADMIN, ContractStatusLevel::StopAll)),
            TokenError::Unauthorized
        );
        set_status(&mut chain, "ops", ContractStatusLevel::StopAll).unwrap();
        set_status(&mut chain, "ops", ContractStatusLevel::NormalRun).unwrap();
    }

    #[test]
    fn test_admin_answers_are_success_envelopes() {
        let mut chain = TestChain::new();
        let response = set_status(&mut chain, ADMIN, ContractStatusLevel::StopAllButRedeems).unwrap();
        assert_eq!(response.data.len(), 256);
        assert_eq!(
            answer(&response),
            HandleAnswer::SetContractStatus {
                status: ResponseStatus::Success
            }
        );
    }
}
