//! Trellis - consistency engine for hierarchical dependency graphs.
//!
//! Trellis validates proposed changes to a directed graph of hierarchical
//! entities (requirements, modules, build targets) before they are
//! committed to a store. Three independent invariants are enforced:
//!
//! - **Ordering**: hierarchical level ordering between linked entities
//!   ([`ordering::OrderingValidator`])
//! - **Acyclicity**: no cycles and no self-references
//!   ([`cycles::detect_cycles`])
//! - **Bounded depth**: traversal depth from root entities stays within
//!   a configured limit ([`depth::DepthValidator`])
//!
//! The [`coordinator::ValidationCoordinator`] sequences all three over a
//! [`domain::MutationBatch`] and the current edge set, producing one
//! merged, serializable [`domain::ValidationReport`]. The engine is pure:
//! it performs no I/O, holds no cross-call state, and never mutates any
//! store; deciding what to do with a rejected batch belongs to callers.
//!
//! # Example
//!
//! ```
//! use trellis::coordinator::ValidationCoordinator;
//! use trellis::domain::{Edge, MutationBatch, NodeDecl, RelationKind};
//!
//! let mut batch = MutationBatch::new();
//! batch
//!     .declare_node(NodeDecl {
//!         id: "vision-1".into(),
//!         title: Some("Product vision".to_string()),
//!         hierarchy_level: Some(0),
//!     })
//!     .declare_node(NodeDecl {
//!         id: "task-9".into(),
//!         title: Some("Implement login".to_string()),
//!         hierarchy_level: Some(4),
//!     })
//!     .declare_edge(Edge::new("task-9", "vision-1", RelationKind::DependsOn));
//!
//! let coordinator = ValidationCoordinator::new().with_max_depth(10);
//! let report = coordinator.validate(&[], &batch)?;
//! assert!(report.is_accepted());
//! # Ok::<(), trellis::error::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod coordinator;
pub mod cycles;
pub mod depth;
pub mod domain;
pub mod error;
pub mod ordering;
pub mod taxonomy;

// Internal petgraph adjacency shared by the whole-graph validators
pub(crate) mod graph;
