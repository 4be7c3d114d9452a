//! Domain types for graph consistency validation.
//!
//! This module contains the structured records exchanged with callers:
//! node and edge declarations, mutation batches, and the three report
//! types produced by the validators. All of them are plain serde-friendly
//! data with no embedded behavior beyond small accessors.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Unique identifier for a graph node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a new node ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The ID as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Kind of directed relation between two nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationKind {
    /// Source depends on target
    DependsOn,

    /// Source is the hierarchical parent of target
    ParentOf,
}

/// A proposed node declaration.
///
/// Nodes are read-only inputs to the engine; `hierarchy_level` may be
/// absent, in which case it can be inferred from the title against the
/// configured taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDecl {
    /// Unique identifier
    pub id: NodeId,

    /// Display title (optional)
    pub title: Option<String>,

    /// Abstraction tier: 0 = most abstract, increasing = more concrete
    pub hierarchy_level: Option<u8>,
}

impl NodeDecl {
    /// Create a declaration with neither title nor level
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            hierarchy_level: None,
        }
    }
}

/// A directed edge between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Source node
    pub from: NodeId,

    /// Target node
    pub to: NodeId,

    /// Relation kind
    pub kind: RelationKind,
}

impl Edge {
    /// Create a new edge
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, kind: RelationKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
        }
    }

    /// Whether source and target are the same node
    #[must_use]
    pub fn is_self_reference(&self) -> bool {
        self.from == self.to
    }
}

/// A single declaration inside a mutation batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Declaration {
    /// Declare a node
    Node(NodeDecl),

    /// Declare an edge
    Edge(Edge),
}

/// An ordered set of proposed node and edge declarations.
///
/// Edge declarations may reference nodes declared earlier in the same
/// batch or nodes already present in the existing graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationBatch {
    /// Declarations in proposal order
    pub declarations: Vec<Declaration>,
}

impl MutationBatch {
    /// Create an empty batch
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node declaration
    pub fn declare_node(&mut self, node: NodeDecl) -> &mut Self {
        self.declarations.push(Declaration::Node(node));
        self
    }

    /// Append an edge declaration
    pub fn declare_edge(&mut self, edge: Edge) -> &mut Self {
        self.declarations.push(Declaration::Edge(edge));
        self
    }

    /// Iterate over declared nodes
    pub fn nodes(&self) -> impl Iterator<Item = &NodeDecl> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Node(n) => Some(n),
            Declaration::Edge(_) => None,
        })
    }

    /// Iterate over declared edges
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Edge(e) => Some(e),
            Declaration::Node(_) => None,
        })
    }

    /// Whether the batch contains no declarations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Kind of fatal structural violation found by the ordering check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Hierarchical ordering between linked nodes is broken
    HierarchyViolation,

    /// A node depends on itself
    SelfReference,
}

/// Verdict of the ordering check over a mutation batch.
///
/// `score` summarizes severity in `[-1.0, 0.0]`: 0.0 means no issue,
/// -0.3 a non-fatal title/level mismatch, -1.0 a structural violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the batch may be committed
    pub is_valid: bool,

    /// Severity score in `[-1.0, 0.0]`
    pub score: f64,

    /// Fatal violation kind, if any
    pub error_kind: Option<ViolationKind>,

    /// Non-fatal findings
    pub warnings: Vec<String>,

    /// Human-readable evidence for each finding
    pub details: Vec<String>,
}

impl ValidationResult {
    /// A fully valid result with no findings
    #[must_use]
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            score: 0.0,
            error_kind: None,
            warnings: Vec::new(),
            details: Vec::new(),
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

/// Report of self-references and directed cycles in an edge set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    /// Whether any violation was found
    pub has_cycles: bool,

    /// Representative cycles, each a closed walk of >= 2 distinct nodes
    pub cycles: Vec<Vec<NodeId>>,

    /// Nodes with an edge to themselves
    pub self_references: Vec<NodeId>,

    /// `cycles.len() + self_references.len()`
    pub total_violations: usize,
}

/// A single node exceeding the configured depth bound
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthViolation {
    /// The offending node
    pub node: NodeId,

    /// Depth at which the node was reached
    pub depth: usize,

    /// The configured bound it exceeds
    pub max_allowed: usize,

    /// A concrete root-to-node path of that depth, for diagnostics
    pub path: Vec<NodeId>,
}

/// Report of per-node traversal depth from root nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthReport {
    /// `false` iff some node exceeds the configured bound
    pub is_valid: bool,

    /// Largest depth reached by any node
    pub max_depth_found: usize,

    /// Nodes exceeding the bound, with diagnostic paths
    pub violations: Vec<DepthViolation>,

    /// Depth of every node reachable from at least one root
    pub node_depths: HashMap<NodeId, usize>,
}

/// Combined report produced by the coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Ordering verdict over the batch alone
    pub ordering: ValidationResult,

    /// Cycle report over the combined (existing + batch) edge set
    pub cycles: CycleReport,

    /// Depth report over the combined (existing + batch) edge set
    pub depth: DepthReport,
}

impl ValidationReport {
    /// Whether the batch should be accepted.
    ///
    /// Rejected if the ordering check failed, any cycle or self-reference
    /// exists, or the depth bound is exceeded.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.ordering.is_valid && !self.cycles.has_cycles && self.depth.is_valid
    }
}
