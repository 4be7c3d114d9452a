//! Error types for the consistency engine.
//!
//! Structural violations are verdicts carried inside the reports, never
//! errors; only malformed input crosses the engine boundary as `Error`.

use crate::domain::NodeId;
use thiserror::Error;

/// The error type for consistency-engine operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A batch edge references a node id that is neither declared in the
    /// batch nor present in the existing graph.
    #[error("invalid reference: edge {from} -> {to} names undeclared node {missing}")]
    InvalidReference {
        /// Edge source
        from: NodeId,
        /// Edge target
        to: NodeId,
        /// The endpoint that could not be resolved
        missing: NodeId,
    },

    /// Taxonomy configuration could not be parsed.
    #[error("taxonomy config error: {0}")]
    Taxonomy(#[from] serde_yaml::Error),
}

/// A specialized Result type for consistency-engine operations.
pub type Result<T> = std::result::Result<T, Error>;
