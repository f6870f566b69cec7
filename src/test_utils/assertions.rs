use std::collections::HashMap;
use std::collections::HashSet;

use crate::model::EthAmount;
use crate::model::GraphData;

/// Graph invariants shared by the unit tests
pub struct TestAssertions;

impl TestAssertions {
    pub fn assert_graph_consistent(data: &GraphData) {
        Self::assert_unique_nodes(data);
        Self::assert_links_have_nodes(data);
        Self::assert_totals_match_links(data);
        Self::assert_multiline_groups_contiguous(data);
    }

    pub fn assert_unique_nodes(data: &GraphData) {
        let mut seen = HashSet::new();
        for node in &data.nodes {
            assert!(seen.insert(node.id.as_str()), "duplicate node {}", node.id);
        }
    }

    pub fn assert_links_have_nodes(data: &GraphData) {
        let ids: HashSet<_> = data.nodes.iter().map(|n| n.id.as_str()).collect();
        for link in &data.links {
            assert!(ids.contains(link.source.as_str()), "missing source node {}", link.source);
            assert!(ids.contains(link.target.as_str()), "missing target node {}", link.target);
        }
    }

    pub fn assert_totals_match_links(data: &GraphData) {
        for node in &data.nodes {
            let sent: EthAmount = data.links.iter().filter(|l| l.source == node.id).map(|l| l.value).sum();
            let received: EthAmount = data.links.iter().filter(|l| l.target == node.id).map(|l| l.value).sum();
            assert_eq!(node.sent, sent, "sent total of {}", node.id);
            assert_eq!(node.received, received, "received total of {}", node.id);
        }
    }

    pub fn assert_multiline_groups_contiguous(data: &GraphData) {
        let mut groups: HashMap<(&str, &str), Vec<(usize, usize)>> = HashMap::new();
        for link in &data.links {
            groups
                .entry((link.source.as_str(), link.target.as_str()))
                .or_default()
                .push((link.multiline_index, link.multiline_count));
        }
        for ((source, target), members) in groups {
            let mut indices: Vec<usize> = members.iter().map(|(index, _)| *index).collect();
            indices.sort_unstable();
            let expected: Vec<usize> = (0..members.len()).collect();
            assert_eq!(indices, expected, "indices of group {} -> {}", source, target);
            assert!(
                members.iter().all(|(_, count)| *count == members.len()),
                "count of group {} -> {}",
                source,
                target
            );
        }
    }
}
