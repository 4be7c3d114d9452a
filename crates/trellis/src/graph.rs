//! Shared petgraph adjacency construction.
//!
//! Both whole-graph validators view the edge set the same way: a
//! `DiGraph` whose node weights are [`NodeId`]s. Edge direction follows
//! the caller's declarations: source -> target.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use crate::domain::{Edge, NodeId, RelationKind};

/// An edge set materialized as a petgraph `DiGraph`.
#[derive(Debug, Clone)]
pub(crate) struct EdgeGraph {
    /// Node weights are ids, edge weights the relation kind
    pub(crate) graph: DiGraph<NodeId, RelationKind>,
}

impl EdgeGraph {
    /// Build the graph from an edge slice.
    ///
    /// Nodes are created on first mention; parallel edges and
    /// self-references are kept as declared, since the validators must
    /// see them.
    pub(crate) fn from_edges(edges: &[Edge]) -> Self {
        let mut graph = DiGraph::new();
        let mut node_map: HashMap<&NodeId, NodeIndex> = HashMap::new();

        for edge in edges {
            let from = *node_map
                .entry(&edge.from)
                .or_insert_with(|| graph.add_node(edge.from.clone()));
            let to = *node_map
                .entry(&edge.to)
                .or_insert_with(|| graph.add_node(edge.to.clone()));
            graph.add_edge(from, to, edge.kind);
        }

        Self { graph }
    }

    /// Node id for a graph index
    pub(crate) fn id_of(&self, idx: NodeIndex) -> &NodeId {
        &self.graph[idx]
    }

    /// Number of distinct nodes mentioned by the edge set
    pub(crate) fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}
