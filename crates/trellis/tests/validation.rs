//! Integration tests for the validation pipeline.
//!
//! These exercise the public API end to end: ordering verdicts, cycle and
//! depth reports, and the coordinator's combination and input-validation
//! behavior.

use trellis::coordinator::ValidationCoordinator;
use trellis::cycles::{detect_cycles, find_all_cycles, impact_score};
use trellis::depth::validate_depth;
use trellis::domain::{
    Declaration, Edge, MutationBatch, NodeDecl, NodeId, RelationKind, ViolationKind,
};
use trellis::error::Error;
use trellis::ordering::OrderingValidator;
use trellis::taxonomy::Taxonomy;

fn node(id: &str, title: &str, level: u8) -> Declaration {
    Declaration::Node(NodeDecl {
        id: NodeId::from(id),
        title: Some(title.to_string()),
        hierarchy_level: Some(level),
    })
}

fn dep(from: &str, to: &str) -> Edge {
    Edge::new(from, to, RelationKind::DependsOn)
}

fn parent(from: &str, to: &str) -> Edge {
    Edge::new(from, to, RelationKind::ParentOf)
}

// ========== Spec scenarios ==========

#[test]
fn self_reference_scenario() {
    let report = detect_cycles(&[dep("A", "A")]);
    assert_eq!(report.self_references, vec![NodeId::from("A")]);
    assert!(report.total_violations >= 1);
    assert!(report.has_cycles);
}

#[test]
fn three_cycle_scenario() {
    let report = detect_cycles(&[dep("A", "B"), dep("B", "C"), dep("C", "A")]);
    assert!(report.has_cycles);

    let found = report.cycles.iter().any(|cycle| {
        ["A", "B", "C"]
            .iter()
            .all(|id| cycle.contains(&NodeId::from(*id)))
    });
    assert!(found, "some cycle should contain all of A, B, C");
}

#[test]
fn depth_limit_scenario_within_bound() {
    let report = validate_depth(&[dep("A", "B"), dep("B", "C"), dep("C", "D")], Some(3));
    assert!(report.is_valid);
    assert_eq!(report.max_depth_found, 3);
}

#[test]
fn depth_limit_scenario_exceeding_bound() {
    let report = validate_depth(
        &[dep("A", "B"), dep("B", "C"), dep("C", "D"), dep("D", "E")],
        Some(3),
    );
    assert!(!report.is_valid);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].depth, 4);
}

#[test]
fn hierarchy_violation_scenario() {
    let batch = MutationBatch {
        declarations: vec![
            node("t", "Task", 4),
            node("v", "Vision", 0),
            Declaration::Edge(parent("t", "v")),
        ],
    };

    let result = OrderingValidator::new().validate(&batch);
    assert!(!result.is_valid);
    assert_eq!(result.score, -1.0);
    assert_eq!(result.error_kind, Some(ViolationKind::HierarchyViolation));
}

#[test]
fn layered_dag_produces_no_false_positives() {
    // Strictly layered: every edge runs from concrete to abstract, depth
    // within bound, no repeats.
    let batch = MutationBatch {
        declarations: vec![
            node("v", "Vision", 0),
            node("arch", "Architecture", 1),
            node("mod-a", "Auth module", 2),
            node("mod-b", "Billing module", 2),
            node("comp", "Session component", 3),
            node("task", "Hashing task", 4),
            Declaration::Edge(dep("arch", "v")),
            Declaration::Edge(dep("mod-a", "arch")),
            Declaration::Edge(dep("mod-b", "arch")),
            Declaration::Edge(dep("comp", "mod-a")),
            Declaration::Edge(dep("task", "comp")),
            Declaration::Edge(parent("v", "arch")),
        ],
    };

    let report = ValidationCoordinator::new()
        .with_max_depth(10)
        .validate(&[], &batch)
        .unwrap();

    assert!(report.is_accepted());
    assert!(report.ordering.is_valid);
    assert_eq!(report.ordering.score, 0.0);
    assert!(report.ordering.warnings.is_empty());
    assert_eq!(report.cycles.total_violations, 0);
    assert!(report.depth.is_valid);
}

// ========== Coordinator behavior ==========

#[test]
fn batch_cycle_only_visible_against_existing_graph() {
    let existing = vec![dep("B", "A")];
    let batch = MutationBatch {
        declarations: vec![node("A", "Auth module", 2), Declaration::Edge(dep("A", "B"))],
    };

    let report = ValidationCoordinator::new()
        .validate(&existing, &batch)
        .unwrap();

    assert!(report.ordering.is_valid, "batch alone has no violation");
    assert!(report.cycles.has_cycles, "combined edge set closes a loop");
    assert!(!report.is_accepted());
}

#[test]
fn invalid_reference_is_reported_before_the_algorithms_run() {
    let batch = MutationBatch {
        declarations: vec![Declaration::Edge(dep("nowhere", "anywhere"))],
    };

    let err = ValidationCoordinator::new()
        .validate(&[], &batch)
        .unwrap_err();
    let Error::InvalidReference { missing, .. } = err else {
        panic!("expected InvalidReference, got {err:?}");
    };
    assert_eq!(missing, NodeId::from("nowhere"));
}

#[test]
fn coordinator_is_advisory_and_idempotent() {
    let existing = vec![dep("x", "y")];
    let batch = MutationBatch {
        declarations: vec![node("z", "Cleanup task", 4), Declaration::Edge(dep("z", "x"))],
    };

    let coordinator = ValidationCoordinator::new().with_max_depth(4);
    let first = coordinator.validate(&existing, &batch).unwrap();
    let second = coordinator.validate(&existing, &batch).unwrap();
    assert_eq!(first, second, "validation holds no hidden state");
}

#[test]
fn custom_taxonomy_flows_through_the_coordinator() {
    let taxonomy = Taxonomy::from_yaml(
        r"
levels:
  - level: 0
    name: epic
    keywords: [epic]
  - level: 1
    name: story
    keywords: [story]
",
    )
    .unwrap();

    let batch = MutationBatch {
        declarations: vec![
            // Title says epic (level 0) but declares level 1
            node("e1", "Payments epic", 1),
        ],
    };

    let report = ValidationCoordinator::new()
        .with_ordering(OrderingValidator::with_taxonomy(taxonomy))
        .validate(&[], &batch)
        .unwrap();

    assert!(report.ordering.is_valid);
    assert_eq!(report.ordering.score, -0.3);
    assert!(report.ordering.warnings[0].contains("level 0"));
}

// ========== Report shape ==========

#[test]
fn reports_serialize_to_structured_json() {
    let batch = MutationBatch {
        declarations: vec![
            node("t", "Task", 4),
            node("v", "Vision", 0),
            Declaration::Edge(parent("t", "v")),
            Declaration::Edge(dep("v", "v")),
        ],
    };

    let report = ValidationCoordinator::new().validate(&[], &batch).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["ordering"]["is_valid"], false);
    assert_eq!(json["ordering"]["error_kind"], "hierarchy_violation");
    assert_eq!(json["cycles"]["self_references"][0], "v");
}

#[test]
fn impact_scores_rank_tight_cycles_as_worse() {
    let long_cycle: Vec<Edge> = (0..8)
        .map(|i| dep(&format!("n{i}"), &format!("n{}", (i + 1) % 8)))
        .collect();
    let long_len = detect_cycles(&long_cycle).cycles[0].len();

    let tight = detect_cycles(&[dep("a", "b"), dep("b", "a")]).cycles[0].len();

    assert!(impact_score(tight) < impact_score(long_len));
    assert_eq!(impact_score(1), -100, "self-reference is the worst finding");
}

#[test]
fn tarjan_and_dfs_agree_on_whether_cycles_exist() {
    let edges = vec![
        dep("a", "b"),
        dep("b", "c"),
        dep("c", "a"),
        dep("c", "d"),
        dep("d", "e"),
    ];
    let report = detect_cycles(&edges);
    let sccs = find_all_cycles(&edges);

    assert_eq!(report.cycles.is_empty(), sccs.is_empty());
}
