//! Sequencing of the three validators into one advisory report.
//!
//! The coordinator validates input references, runs the cheap batch-local
//! ordering check first, then the whole-graph cycle and depth checks over
//! the edge set that would result from applying the batch. It never
//! touches storage; the caller decides what to do with a rejected batch.

use std::collections::HashSet;

use crate::cycles;
use crate::depth::DepthValidator;
use crate::domain::{Edge, MutationBatch, NodeId, ValidationReport};
use crate::error::{Error, Result};
use crate::ordering::OrderingValidator;

/// Runs the full validation pipeline over a proposed mutation batch.
///
/// Cycle and depth checks always run against `existing ∪ batch` edges,
/// never the batch alone: a two-node cycle may only become visible once
/// combined with existing edges. They also run when the ordering check
/// already rejected the batch, so the caller always receives a complete
/// picture; the overall verdict is still rejection.
#[derive(Debug, Clone, Default)]
pub struct ValidationCoordinator {
    ordering: OrderingValidator,
    depth: DepthValidator,
    max_depth: Option<usize>,
}

impl ValidationCoordinator {
    /// Create a coordinator with the default taxonomy and no depth bound
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the ordering validator (e.g. with a custom taxonomy)
    #[must_use]
    pub fn with_ordering(mut self, ordering: OrderingValidator) -> Self {
        self.ordering = ordering;
        self
    }

    /// Replace the depth validator (e.g. with shortest-path semantics)
    #[must_use]
    pub fn with_depth(mut self, depth: DepthValidator) -> Self {
        self.depth = depth;
        self
    }

    /// Set the maximum traversal depth enforced by the depth check
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Validate a batch against the existing edge set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidReference`] if a batch edge names a node
    /// id that is neither declared in the batch nor present in the
    /// existing graph. The validators themselves are total: once input
    /// validation passes, a complete report is always produced.
    pub fn validate(
        &self,
        existing_edges: &[Edge],
        batch: &MutationBatch,
    ) -> Result<ValidationReport> {
        check_references(existing_edges, batch)?;

        tracing::debug!(
            existing = existing_edges.len(),
            declarations = batch.declarations.len(),
            "starting validation pipeline"
        );

        let ordering = self.ordering.validate(batch);

        // The edge set that would result from applying the batch
        let combined: Vec<Edge> = existing_edges
            .iter()
            .chain(batch.edges())
            .cloned()
            .collect();

        let cycle_report = cycles::detect_cycles(&combined);
        let depth_report = self.depth.validate_depth(&combined, self.max_depth);

        let report = ValidationReport {
            ordering,
            cycles: cycle_report,
            depth: depth_report,
        };

        tracing::debug!(accepted = report.is_accepted(), "validation pipeline finished");
        Ok(report)
    }
}

/// Reject edges that reference node ids unknown to both the batch and
/// the existing graph.
fn check_references(existing_edges: &[Edge], batch: &MutationBatch) -> Result<()> {
    let mut known: HashSet<&NodeId> = HashSet::new();
    for edge in existing_edges {
        known.insert(&edge.from);
        known.insert(&edge.to);
    }
    for node in batch.nodes() {
        known.insert(&node.id);
    }

    for edge in batch.edges() {
        for endpoint in [&edge.from, &edge.to] {
            if !known.contains(endpoint) {
                return Err(Error::InvalidReference {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    missing: endpoint.clone(),
                });
            }
        }
    }
    Ok(())
}
