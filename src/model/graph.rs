use std::collections::HashMap;

use petgraph::Graph;
use petgraph::prelude::*;
use serde::Deserialize;
use serde::Serialize;

use super::address::Address;
use super::amount::EthAmount;
use super::transaction::AcceptedTransaction;

/// How addresses map onto graph nodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKeying {
    /// Exact string; case variants of one account become separate nodes
    #[default]
    Exact,
    /// Lowercase address
    Canonical,
}

impl NodeKeying {
    pub fn key(
        &self,
        address: &Address,
    ) -> String {
        match self {
            NodeKeying::Exact => address.as_str().to_string(),
            NodeKeying::Canonical => address.canonical(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressNode {
    pub id: String,
    pub label: String,
    pub total_sent: EthAmount,
    pub total_received: EthAmount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferEdge {
    pub from: String,
    pub to: String,
    pub amount: EthAmount,
    pub hash: String,
    pub timestamp: i64,
    pub time: String,
}

#[derive(Debug, Clone, Default)]
pub struct TransferGraph {
    graph:        Graph<AddressNode, TransferEdge>,
    node_indices: HashMap<String, NodeIndex>,
    keying:       NodeKeying,
}

impl TransferGraph {
    pub fn new(keying: NodeKeying) -> Self {
        Self {
            graph: Graph::new(),
            node_indices: HashMap::new(),
            keying,
        }
    }

    pub fn from_transactions(
        transactions: &[AcceptedTransaction],
        keying: NodeKeying,
    ) -> Self {
        let mut graph = Self::new(keying);
        for tx in transactions {
            graph.add_transfer(tx);
        }
        graph
    }

    pub fn add_node(
        &mut self,
        address: &Address,
    ) -> NodeIndex {
        let id = self.keying.key(address);
        if let Some(&idx) = self.node_indices.get(&id) {
            return idx;
        }

        let node = AddressNode {
            label: address.short_label(),
            id: id.clone(),
            total_sent: EthAmount::ZERO,
            total_received: EthAmount::ZERO,
        };

        let idx = self.graph.add_node(node);
        self.node_indices.insert(id, idx);

        idx
    }

    pub fn add_transfer(
        &mut self,
        tx: &AcceptedTransaction,
    ) {
        let from_idx = self.add_node(&tx.from);
        let to_idx = self.add_node(&tx.to);

        self.graph[from_idx].total_sent += tx.value;
        self.graph[to_idx].total_received += tx.value;

        let edge = TransferEdge {
            from: self.graph[from_idx].id.clone(),
            to: self.graph[to_idx].id.clone(),
            amount: tx.value,
            hash: tx.hash.clone(),
            timestamp: tx.timestamp,
            time: tx.time.clone(),
        };

        self.graph.add_edge(from_idx, to_idx, edge);
    }

    pub fn get_node_count(&self) -> usize { self.graph.node_count() }

    pub fn get_edge_count(&self) -> usize { self.graph.edge_count() }

    pub fn get_node(
        &self,
        id: &str,
    ) -> Option<&AddressNode> {
        self.node_indices.get(id).and_then(|&idx| self.graph.node_weight(idx))
    }

    /// Transfers sent by `id`, in insertion order
    pub fn outgoing(
        &self,
        id: &str,
    ) -> Vec<&TransferEdge> {
        let Some(&idx) = self.node_indices.get(id) else {
            return Vec::new();
        };
        let mut edges: Vec<_> = self.graph.edges_directed(idx, Outgoing).collect();
        edges.sort_by_key(|edge| edge.id());
        edges.into_iter().map(|edge| edge.weight()).collect()
    }

    pub fn to_graph_data(&self) -> GraphData {
        let nodes = self
            .graph
            .node_weights()
            .map(|node| GraphNode {
                id: node.id.clone(),
                label: node.label.clone(),
                sent: node.total_sent,
                received: node.total_received,
            })
            .collect();

        let mut links: Vec<GraphLink> = self
            .graph
            .edge_weights()
            .map(|edge| GraphLink {
                source: edge.from.clone(),
                target: edge.to.clone(),
                value: edge.amount,
                hash: edge.hash.clone(),
                time: edge.time.clone(),
                timestamp: edge.timestamp,
                multiline_index: 0,
                multiline_count: 0,
            })
            .collect();

        assign_multiline_indices(&mut links);

        GraphData { nodes, links }
    }
}

/// Gives every link its position inside the group of links sharing the exact
/// `(source, target)` pair, in encounter order, plus the group size.
pub fn assign_multiline_indices(links: &mut [GraphLink]) {
    let mut group_sizes: HashMap<(String, String), usize> = HashMap::new();
    for link in links.iter() {
        *group_sizes.entry((link.source.clone(), link.target.clone())).or_default() += 1;
    }

    let mut next_index: HashMap<(String, String), usize> = HashMap::new();
    for link in links.iter_mut() {
        let key = (link.source.clone(), link.target.clone());
        let index = next_index.entry(key.clone()).or_default();
        link.multiline_index = *index;
        link.multiline_count = group_sizes.get(&key).copied().unwrap_or(1);
        *index += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub sent: EthAmount,
    pub received: EthAmount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub value: EthAmount,
    pub hash: String,
    pub time: String,
    pub timestamp: i64,
    pub multiline_index: usize,
    pub multiline_count: usize,
}

impl GraphLink {
    /// Signed multiple of the base perpendicular offset, symmetric around the
    /// straight line between the endpoints.
    pub fn offset_multiplier(&self) -> f64 {
        if self.multiline_count > 1 {
            self.multiline_index as f64 - (self.multiline_count as f64 - 1.0) / 2.0
        } else {
            0.0
        }
    }

    pub fn touches(
        &self,
        id: &str,
    ) -> bool {
        self.source == id || self.target == id
    }
}

/// Node/link document handed to renderers and exporters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl GraphData {
    pub fn build(
        transactions: &[AcceptedTransaction],
        keying: NodeKeying,
    ) -> Self {
        TransferGraph::from_transactions(transactions, keying).to_graph_data()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    /// Hashes of every link with `id` as source or target, in link order
    pub fn hashes_touching(
        &self,
        id: &str,
    ) -> Vec<&str> {
        self.links.iter().filter(|link| link.touches(id)).map(|link| link.hash.as_str()).collect()
    }
}
