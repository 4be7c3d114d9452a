//! Traversal-depth validation from root nodes.
//!
//! Roots are nodes that never appear as an edge target. Depth is computed
//! by breadth-first traversal from all roots at once; by default a node's
//! depth is the **maximum** over all root-to-node paths, matching
//! worst-case-for-traversal semantics. Callers wanting closest-root
//! semantics can select shortest-path depth instead.

use std::collections::VecDeque;

use petgraph::graph::NodeIndex;
use petgraph::Direction;

use crate::domain::{DepthReport, DepthViolation, Edge, NodeId};
use crate::graph::EdgeGraph;

/// How per-node depth is computed when multiple root paths reach a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DepthSemantics {
    /// Depth of the longest root-to-node path (worst case for traversal
    /// and compute limits). The reference behavior.
    #[default]
    LongestPath,

    /// Depth of the shortest root-to-node path (closest root).
    ShortestPath,
}

/// Validates that no node sits deeper than a configured bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthValidator {
    semantics: DepthSemantics,
}

impl DepthValidator {
    /// Create a validator with longest-path semantics
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with explicit depth semantics
    #[must_use]
    pub fn with_semantics(semantics: DepthSemantics) -> Self {
        Self { semantics }
    }

    /// Compute per-node depth from all roots and check the bound.
    ///
    /// With `max_depth = None` the report is always valid and only
    /// `max_depth_found` is meaningful. Nodes with no path from any root
    /// (for example, members of a detached cycle) are excluded from
    /// `node_depths`; roots themselves have depth 0. Disconnected
    /// components and multiple roots are handled by seeding the traversal
    /// with every root at once.
    #[must_use]
    pub fn validate_depth(&self, edges: &[Edge], max_depth: Option<usize>) -> DepthReport {
        let eg = EdgeGraph::from_edges(edges);
        let n = eg.node_count();

        let roots: Vec<NodeIndex> = eg
            .graph
            .node_indices()
            .filter(|&idx| {
                eg.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .collect();

        let depths = match self.semantics {
            DepthSemantics::LongestPath => longest_depths(&eg, &roots),
            DepthSemantics::ShortestPath => shortest_depths(&eg, &roots),
        };

        let max_depth_found = depths.iter().flatten().copied().max().unwrap_or(0);

        let mut violations = Vec::new();
        if let Some(max_allowed) = max_depth {
            for idx in eg.graph.node_indices() {
                let Some(depth) = depths[idx.index()] else {
                    continue;
                };
                if depth > max_allowed {
                    violations.push(DepthViolation {
                        node: eg.id_of(idx).clone(),
                        depth,
                        max_allowed,
                        path: reconstruct_path(&eg, &depths, idx),
                    });
                }
            }
            violations.sort_by(|a, b| a.node.cmp(&b.node));
        }

        let node_depths = eg
            .graph
            .node_indices()
            .filter_map(|idx| depths[idx.index()].map(|d| (eg.id_of(idx).clone(), d)))
            .collect();

        tracing::debug!(
            nodes = n,
            roots = roots.len(),
            max_depth_found,
            violations = violations.len(),
            "depth validation finished"
        );

        DepthReport {
            is_valid: violations.is_empty(),
            max_depth_found,
            violations,
            node_depths,
        }
    }
}

/// Longest root-to-node depth by relaxation over a BFS queue.
///
/// A node is re-enqueued whenever a longer path reaches it. Depth along a
/// simple path never exceeds `node_count - 1`, so updates beyond that cap
/// are dropped; that keeps the pass terminating even when the edge set
/// contains cycles, which can happen when diagnostics run on a graph the
/// cycle check already rejected.
fn longest_depths(eg: &EdgeGraph, roots: &[NodeIndex]) -> Vec<Option<usize>> {
    let n = eg.node_count();
    let cap = n.saturating_sub(1);
    let mut depths: Vec<Option<usize>> = vec![None; n];
    let mut queue: VecDeque<NodeIndex> = VecDeque::new();

    for &root in roots {
        depths[root.index()] = Some(0);
        queue.push_back(root);
    }

    while let Some(node) = queue.pop_front() {
        let Some(depth) = depths[node.index()] else {
            continue;
        };
        let next = depth + 1;
        if next > cap {
            continue;
        }
        for child in eg.graph.neighbors(node) {
            if depths[child.index()].is_none_or(|d| d < next) {
                depths[child.index()] = Some(next);
                queue.push_back(child);
            }
        }
    }

    depths
}

/// Shortest root-to-node depth by plain multi-source BFS.
fn shortest_depths(eg: &EdgeGraph, roots: &[NodeIndex]) -> Vec<Option<usize>> {
    let mut depths: Vec<Option<usize>> = vec![None; eg.node_count()];
    let mut queue: VecDeque<NodeIndex> = VecDeque::new();

    for &root in roots {
        depths[root.index()] = Some(0);
        queue.push_back(root);
    }

    while let Some(node) = queue.pop_front() {
        let Some(depth) = depths[node.index()] else {
            continue;
        };
        for child in eg.graph.neighbors(node) {
            if depths[child.index()].is_none() {
                depths[child.index()] = Some(depth + 1);
                queue.push_back(child);
            }
        }
    }

    depths
}

/// Reconstruct a root-to-node path of the node's recorded depth.
///
/// Walks the reverse adjacency, at each step picking a predecessor whose
/// depth is exactly one less. For acyclic inputs such a predecessor
/// always exists; if the depth cap truncated relaxation, the walk stops
/// early and the partial path is returned.
fn reconstruct_path(eg: &EdgeGraph, depths: &[Option<usize>], node: NodeIndex) -> Vec<NodeId> {
    let mut path = vec![eg.id_of(node).clone()];
    let mut current = node;
    let mut depth = depths[node.index()].unwrap_or(0);

    while depth > 0 {
        let pred = eg
            .graph
            .neighbors_directed(current, Direction::Incoming)
            .find(|p| depths[p.index()] == Some(depth - 1));
        let Some(pred) = pred else {
            break;
        };
        path.push(eg.id_of(pred).clone());
        current = pred;
        depth -= 1;
    }

    path.reverse();
    path
}

/// Convenience free function mirroring [`DepthValidator::validate_depth`]
/// with longest-path semantics.
#[must_use]
pub fn validate_depth(edges: &[Edge], max_depth: Option<usize>) -> DepthReport {
    DepthValidator::new().validate_depth(edges, max_depth)
}
