use std::collections::BTreeMap;
use std::collections::HashMap;

use proptest::prelude::*;
use qaif::model::AcceptedTransaction;
use qaif::model::Address;
use qaif::model::EthAmount;
use qaif::model::GraphData;
use qaif::model::NodeKeying;

/// Small address pool so that cycles, repeats and case variants actually occur
fn arbitrary_address() -> impl Strategy<Value = Address> {
    (0u8..6, any::<bool>()).prop_map(|(n, upper)| {
        let raw = format!("0xabcdef{:034x}", n);
        let raw = if upper { format!("0x{}", raw[2..].to_ascii_uppercase()) } else { raw };
        Address::parse(&raw).unwrap()
    })
}

fn arbitrary_transactions() -> impl Strategy<Value = Vec<AcceptedTransaction>> {
    prop::collection::vec((arbitrary_address(), arbitrary_address(), 0u128..=50_000_000_000_000_000_000u128), 0..=40)
        .prop_map(|transfers| {
            transfers
                .into_iter()
                .enumerate()
                .map(|(i, (from, to, wei))| AcceptedTransaction {
                    from,
                    to,
                    wei,
                    value: EthAmount::from_wei(wei),
                    hash: format!("0x{:04x}", i),
                    timestamp: 1_700_000_000 + i as i64,
                    time: String::new(),
                })
                .collect()
        })
}

fn arbitrary_keying() -> impl Strategy<Value = NodeKeying> {
    prop_oneof![Just(NodeKeying::Exact), Just(NodeKeying::Canonical)]
}

proptest! {
    #[test]
    fn prop_totals_equal_link_sums(
        transactions in arbitrary_transactions(),
        keying in arbitrary_keying(),
    ) {
        let graph = GraphData::build(&transactions, keying);

        for node in &graph.nodes {
            let sent: EthAmount = graph.links.iter().filter(|link| link.source == node.id).map(|link| link.value).sum();
            let received: EthAmount = graph.links.iter().filter(|link| link.target == node.id).map(|link| link.value).sum();
            prop_assert_eq!(node.sent, sent);
            prop_assert_eq!(node.received, received);
        }
    }

    #[test]
    fn prop_multiline_groups_are_dense(
        transactions in arbitrary_transactions(),
        keying in arbitrary_keying(),
    ) {
        let graph = GraphData::build(&transactions, keying);

        let mut groups: HashMap<(&str, &str), Vec<(usize, usize)>> = HashMap::new();
        for link in &graph.links {
            groups.entry((link.source.as_str(), link.target.as_str())).or_default().push((link.multiline_index, link.multiline_count));
        }

        for members in groups.values() {
            let indices: Vec<usize> = members.iter().map(|(index, _)| *index).collect();
            prop_assert_eq!(indices, (0..members.len()).collect::<Vec<_>>());
            prop_assert!(members.iter().all(|(_, count)| *count == members.len()));
        }
    }

    #[test]
    fn prop_builder_is_idempotent(
        transactions in arbitrary_transactions(),
        keying in arbitrary_keying(),
    ) {
        let first = serde_json::to_string(&GraphData::build(&transactions, keying)).unwrap();
        let second = serde_json::to_string(&GraphData::build(&transactions, keying)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_nodes_unique_and_links_preserve_order(
        transactions in arbitrary_transactions(),
        keying in arbitrary_keying(),
    ) {
        let graph = GraphData::build(&transactions, keying);

        let mut seen = BTreeMap::new();
        for (position, node) in graph.nodes.iter().enumerate() {
            prop_assert!(seen.insert(node.id.clone(), position).is_none());
        }

        let hashes: Vec<&str> = graph.links.iter().map(|link| link.hash.as_str()).collect();
        let expected: Vec<&str> = transactions.iter().map(|tx| tx.hash.as_str()).collect();
        prop_assert_eq!(hashes, expected);
    }

    #[test]
    fn prop_canonical_keying_never_adds_nodes(transactions in arbitrary_transactions()) {
        let exact = GraphData::build(&transactions, NodeKeying::Exact);
        let canonical = GraphData::build(&transactions, NodeKeying::Canonical);

        prop_assert!(canonical.nodes.len() <= exact.nodes.len());
        prop_assert!(canonical.nodes.iter().all(|node| node.id == node.id.to_ascii_lowercase()));
    }
}
