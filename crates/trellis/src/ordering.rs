//! Hierarchical ordering checks over a mutation batch.
//!
//! This validator is the fast, batch-local front of the pipeline: it
//! never traverses the full graph. It enforces level ordering on proposed
//! edges and flags title/level disagreements as non-fatal warnings.

use std::collections::HashMap;

use crate::domain::{MutationBatch, NodeId, RelationKind, ValidationResult, ViolationKind};
use crate::taxonomy::Taxonomy;

/// Severity assigned to a non-fatal title/level mismatch.
const MISMATCH_SCORE: f64 = -0.3;

/// Severity assigned to a structural violation.
const VIOLATION_SCORE: f64 = -1.0;

/// Validates level ordering and title/level consistency within a batch.
///
/// Levels resolve from the declaration's explicit `hierarchy_level`, or
/// by keyword inference over the title when the explicit level is absent.
/// Edges whose endpoints have no resolvable level are accepted: there is
/// not enough information to judge them, which is not a violation.
#[derive(Debug, Clone, Default)]
pub struct OrderingValidator {
    taxonomy: Taxonomy,
}

impl OrderingValidator {
    /// Create a validator with the default taxonomy
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with a caller-supplied taxonomy
    #[must_use]
    pub fn with_taxonomy(taxonomy: Taxonomy) -> Self {
        Self { taxonomy }
    }

    /// Validate every declaration in the batch.
    ///
    /// The most severe verdict found anywhere in the batch wins:
    /// a structural violation (-1.0) over a title/level mismatch (-0.3)
    /// over no finding (0.0). Warnings and details accumulate across the
    /// whole batch rather than stopping at the first finding.
    #[must_use]
    pub fn validate(&self, batch: &MutationBatch) -> ValidationResult {
        let mut result = ValidationResult::valid();

        let levels = self.resolve_levels(batch);
        let names: HashMap<&NodeId, &str> = batch
            .nodes()
            .map(|n| (&n.id, n.title.as_deref().unwrap_or(n.id.as_str())))
            .collect();

        // Title/level consistency over node declarations
        for node in batch.nodes() {
            let (Some(declared), Some(title)) = (node.hierarchy_level, node.title.as_deref())
            else {
                continue;
            };
            if let Some(expected) = self.taxonomy.infer_level(title) {
                if expected != declared {
                    let name = self
                        .taxonomy
                        .level_name(expected)
                        .unwrap_or("unknown")
                        .to_string();
                    result.warnings.push(format!(
                        "title '{title}' suggests level {expected} ({name}), but node {} declares level {declared}",
                        node.id
                    ));
                }
            }
        }

        // Structural checks over edge declarations
        for edge in batch.edges() {
            if edge.is_self_reference() {
                record_violation(
                    &mut result,
                    ViolationKind::SelfReference,
                    format!("node {} declares an edge to itself", edge.from),
                );
                continue;
            }

            let from_level = levels.get(&edge.from).copied();
            let to_level = levels.get(&edge.to).copied();
            let (Some(from_level), Some(to_level)) = (from_level, to_level) else {
                // Insufficient information to judge this edge
                continue;
            };

            match edge.kind {
                RelationKind::ParentOf if from_level >= to_level => {
                    record_violation(
                        &mut result,
                        ViolationKind::HierarchyViolation,
                        format!(
                            "level {from_level} ({}) cannot be parent of level {to_level} ({}): a parent must sit above its child",
                            display_name(&names, &edge.from),
                            display_name(&names, &edge.to),
                        ),
                    );
                }
                RelationKind::DependsOn if from_level < to_level => {
                    record_violation(
                        &mut result,
                        ViolationKind::HierarchyViolation,
                        format!(
                            "level {from_level} ({}) must not depend on more concrete level {to_level} ({}): only lower layers depend on higher ones",
                            display_name(&names, &edge.from),
                            display_name(&names, &edge.to),
                        ),
                    );
                }
                RelationKind::ParentOf | RelationKind::DependsOn => {}
            }
        }

        if result.error_kind.is_none() && !result.warnings.is_empty() {
            result.score = MISMATCH_SCORE;
        }

        tracing::debug!(
            declarations = batch.declarations.len(),
            is_valid = result.is_valid,
            score = result.score,
            "ordering validation finished"
        );
        result
    }

    /// Resolve a level for every declared node: explicit first, then
    /// title inference.
    fn resolve_levels(&self, batch: &MutationBatch) -> HashMap<NodeId, u8> {
        let mut levels = HashMap::new();
        for node in batch.nodes() {
            let level = node.hierarchy_level.or_else(|| {
                node.title
                    .as_deref()
                    .and_then(|title| self.taxonomy.infer_level(title))
            });
            if let Some(level) = level {
                levels.insert(node.id.clone(), level);
            }
        }
        levels
    }
}

fn record_violation(result: &mut ValidationResult, kind: ViolationKind, detail: String) {
    result.is_valid = false;
    result.score = VIOLATION_SCORE;
    // The first fatal finding names the batch's error kind
    if result.error_kind.is_none() {
        result.error_kind = Some(kind);
    }
    result.details.push(detail);
}

fn display_name<'a>(names: &HashMap<&NodeId, &'a str>, id: &NodeId) -> &'a str {
    names.get(id).copied().unwrap_or("unknown node")
}

/// Convenience free function mirroring [`OrderingValidator::validate`]
/// with the default taxonomy.
#[must_use]
pub fn validate_ordering(batch: &MutationBatch) -> ValidationResult {
    OrderingValidator::new().validate(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Declaration, Edge, NodeDecl};

    fn node(id: &str, title: &str, level: Option<u8>) -> Declaration {
        Declaration::Node(NodeDecl {
            id: NodeId::from(id),
            title: Some(title.to_string()),
            hierarchy_level: level,
        })
    }

    fn batch(declarations: Vec<Declaration>) -> MutationBatch {
        MutationBatch { declarations }
    }

    #[test]
    fn task_cannot_be_parent_of_vision() {
        let b = batch(vec![
            node("t1", "Password task", Some(4)),
            node("v1", "Product vision", Some(0)),
            Declaration::Edge(Edge::new("t1", "v1", RelationKind::ParentOf)),
        ]);

        let result = validate_ordering(&b);
        assert!(!result.is_valid);
        assert_eq!(result.score, -1.0);
        assert_eq!(result.error_kind, Some(ViolationKind::HierarchyViolation));
        assert!(
            result.details[0].contains("level 4"),
            "detail should name the offending levels: {:?}",
            result.details
        );
    }

    #[test]
    fn equal_levels_cannot_be_parent_and_child() {
        let b = batch(vec![
            node("a", "Auth module", Some(2)),
            node("b", "Billing module", Some(2)),
            Declaration::Edge(Edge::new("a", "b", RelationKind::ParentOf)),
        ]);

        let result = validate_ordering(&b);
        assert_eq!(result.error_kind, Some(ViolationKind::HierarchyViolation));
    }

    #[test]
    fn abstract_node_must_not_depend_on_concrete_node() {
        let b = batch(vec![
            node("v1", "Product vision", Some(0)),
            node("t1", "Login task", Some(4)),
            Declaration::Edge(Edge::new("v1", "t1", RelationKind::DependsOn)),
        ]);

        let result = validate_ordering(&b);
        assert!(!result.is_valid);
        assert_eq!(result.error_kind, Some(ViolationKind::HierarchyViolation));
    }

    #[test]
    fn concrete_node_may_depend_on_abstract_node() {
        let b = batch(vec![
            node("t1", "Login task", Some(4)),
            node("v1", "Product vision", Some(0)),
            Declaration::Edge(Edge::new("t1", "v1", RelationKind::DependsOn)),
        ]);

        let result = validate_ordering(&b);
        assert!(result.is_valid);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn self_reference_is_fatal() {
        let b = batch(vec![
            node("a", "Auth module", Some(2)),
            Declaration::Edge(Edge::new("a", "a", RelationKind::DependsOn)),
        ]);

        let result = validate_ordering(&b);
        assert!(!result.is_valid);
        assert_eq!(result.score, -1.0);
        assert_eq!(result.error_kind, Some(ViolationKind::SelfReference));
    }

    #[test]
    fn title_level_mismatch_is_a_warning_only() {
        // Title says "vision" (level 0) but the node declares level 2
        let b = batch(vec![node("r1", "System vision", Some(2))]);

        let result = validate_ordering(&b);
        assert!(result.is_valid);
        assert_eq!(result.score, -0.3);
        assert_eq!(result.error_kind, None);
        assert!(
            result.warnings[0].contains("level 0"),
            "warning should name the expected level: {:?}",
            result.warnings
        );
    }

    #[test]
    fn levels_infer_from_titles_when_not_declared() {
        let b = batch(vec![
            node("t1", "Deploy task", None),
            node("v1", "Company vision", None),
            Declaration::Edge(Edge::new("t1", "v1", RelationKind::ParentOf)),
        ]);

        let result = validate_ordering(&b);
        assert_eq!(result.error_kind, Some(ViolationKind::HierarchyViolation));
    }

    #[test]
    fn unresolvable_levels_are_accepted() {
        let b = batch(vec![
            node("x", "Untitled one", None),
            node("y", "Untitled two", None),
            Declaration::Edge(Edge::new("x", "y", RelationKind::ParentOf)),
        ]);

        let result = validate_ordering(&b);
        assert!(result.is_valid);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn violation_outranks_warning_across_the_batch() {
        let b = batch(vec![
            node("r1", "System vision", Some(2)), // mismatch warning
            node("t1", "Cleanup task", Some(4)),
            node("v1", "Roadmap goal", Some(0)),
            Declaration::Edge(Edge::new("t1", "v1", RelationKind::ParentOf)),
        ]);

        let result = validate_ordering(&b);
        assert!(!result.is_valid);
        assert_eq!(result.score, -1.0);
        // The warning is still reported alongside the violation
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn validation_is_idempotent() {
        let b = batch(vec![
            node("r1", "System vision", Some(2)),
            node("t1", "Cleanup task", Some(4)),
            Declaration::Edge(Edge::new("t1", "r1", RelationKind::DependsOn)),
        ]);

        let validator = OrderingValidator::new();
        assert_eq!(validator.validate(&b), validator.validate(&b));
    }
}
