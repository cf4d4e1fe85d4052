//! # History Flows
//!
//! Record ids, participant indexing and paging of `transfer_history`.

#[cfg(test)]
mod tests {
    use crate::harness::*;
    use secret_token::prelude::*;

    fn chain_with_transfers(count: u128) -> TestChain {
        let mut chain = TestChain::new();
        chain.onboard("alice");
        chain.onboard("bob");
        chain.deposit("alice", 1_000_000).unwrap();
        for amount in 1..=count {
            chain.transfer("alice", "bob", amount).unwrap();
        }
        chain
    }

    #[test]
    fn test_ids_start_at_one_newest_first() {
        let chain = chain_with_transfers(3);

        let txs = chain.history("alice", None, None);

        let ids: Vec<u64> = txs.iter().map(|tx| tx.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(txs[0].coins, Coin::new(3, SYMBOL));
        assert_eq!(txs[2].coins, Coin::new(1, SYMBOL));
    }

    #[test]
    fn test_paging_walks_backwards() {
        let chain = chain_with_transfers(7);

        let pages: Vec<Vec<u64>> = (0..4)
            .map(|page| {
                chain
                    .history("bob", Some(page), Some(3))
                    .iter()
                    .map(|tx| tx.id)
                    .collect()
            })
            .collect();

        assert_eq!(pages[0], vec![7, 6, 5]);
        assert_eq!(pages[1], vec![4, 3, 2]);
        assert_eq!(pages[2], vec![1]);
        assert!(pages[3].is_empty());
    }

    #[test]
    fn test_default_and_maximum_page_size() {
        let chain = chain_with_transfers(105);

        assert_eq!(chain.history("alice", None, None).len(), 10);
        assert_eq!(chain.history("alice", None, Some(1_000)).len(), 100);
        assert!(chain.history("alice", None, Some(0)).is_empty());
        assert!(chain.history("alice", Some(u32::MAX), Some(100)).is_empty());
    }

    #[test]
    fn test_self_transfer_indexed_once() {
        let mut chain = TestChain::new();
        chain.onboard("alice");
        chain.deposit("alice", 100).unwrap();

        chain.transfer("alice", "alice", 40).unwrap();

        let txs = chain.history("alice", None, None);
        assert_eq!(txs.len(), 1);
        assert_eq!(chain.balance("alice"), 100);
    }

    #[test]
    fn test_created_key_opens_history() {
        let mut chain = chain_with_transfers(2);
        let response = chain
            .exec(
                "bob",
                HandleMsg::CreateViewingKey {
                    entropy: "bob's dice rolls".to_string(),
                },
            )
            .unwrap();
        let HandleAnswer::CreateViewingKey { key: created } = answer(&response) else {
            panic!("unexpected answer");
        };

        let result = chain.query(QueryMsg::TransferHistory {
            address: addr("bob"),
            key: created,
            page: None,
            page_size: None,
        });
        match result {
            QueryAnswer::TransferHistory { txs } => assert_eq!(txs.len(), 2),
            other => panic!("unexpected answer: {other:?}"),
        }

        // The harness key was replaced.
        assert_eq!(
            chain.query(QueryMsg::Balance {
                address: addr("bob"),
                key: key("bob"),
            }),
            QueryAnswer::viewing_key_error()
        );
    }

    #[test]
    fn test_history_wire_shape() {
        let chain = chain_with_transfers(1);
        let raw = chain
            .host
            .query_json(
                br#"{"transfer_history":{"address":"bob","key":"vk-bob","page_size":5}}"#,
            )
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(raw.as_slice()).unwrap();
        let tx = &value["transfer_history"]["txs"][0];
        assert_eq!(tx["sender"], "alice");
        assert_eq!(tx["receiver"], "bob");
        assert_eq!(tx["coins"]["denom"], SYMBOL);
        assert_eq!(tx["coins"]["amount"], "1");
    }
}
