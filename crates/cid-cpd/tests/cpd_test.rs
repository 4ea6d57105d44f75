//! Tests for cid-cpd: tables, placeholders, functional rules, the distribution sum type.

use std::collections::HashMap;

use cid_core::errors::DistributionError;
use cid_cpd::{
    ContinuousCpd, Distribution, DistributionKind, FunctionalCpd, IModelView, PlaceholderCpd,
    TabularCpd,
};
use proptest::prelude::*;

/// Minimal model view backed by maps.
#[derive(Default)]
struct MapView {
    parents: HashMap<String, Vec<String>>,
    states: HashMap<String, Vec<f64>>,
}

impl MapView {
    fn with_node(mut self, node: &str, parents: &[&str], states: Option<Vec<f64>>) -> Self {
        self.parents.insert(
            node.to_string(),
            parents.iter().map(|s| s.to_string()).collect(),
        );
        if let Some(states) = states {
            self.states.insert(node.to_string(), states);
        }
        self
    }
}

impl IModelView for MapView {
    fn parents(&self, node: &str) -> Vec<String> {
        self.parents.get(node).cloned().unwrap_or_default()
    }

    fn cardinality(&self, node: &str) -> Option<usize> {
        self.states.get(node).map(Vec::len)
    }

    fn states(&self, node: &str) -> Option<Vec<f64>> {
        self.states.get(node).cloned()
    }
}

fn names(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// Tabular
// =============================================================================

#[test]
fn tabular_rows_are_states_columns_are_evidence() {
    let cpd = TabularCpd::new(
        "Y",
        2,
        vec![vec![0.9, 0.2], vec![0.1, 0.8]],
        names(&["X"]),
        vec![2],
    )
    .unwrap();
    assert_eq!(cpd.columns(), 2);
    assert_eq!(cpd.scope(), names(&["Y", "X"]));
    assert_eq!(cpd.probability(0, 1), 0.2);
    assert_eq!(cpd.probability(1, 1), 0.8);
    assert!(cpd.is_valid(1e-9));
    assert_eq!(cpd.states(), &[0.0, 1.0]);
}

#[test]
fn tabular_rejects_wrong_shape() {
    let err = TabularCpd::new("Y", 2, vec![vec![1.0]], vec![], vec![]).unwrap_err();
    assert!(matches!(err, DistributionError::InvalidTable { .. }));

    let err = TabularCpd::new("Y", 1, vec![vec![1.0, 1.0, 1.0]], names(&["X"]), vec![2]);
    assert!(err.is_err());
}

#[test]
fn tabular_rejects_negative_probabilities() {
    let err = TabularCpd::from_flat("Y", 2, vec![1.5, -0.5], vec![], vec![]).unwrap_err();
    assert!(err.to_string().contains("non-negative"));
}

#[test]
fn tabular_rejects_mismatched_states() {
    let cpd = TabularCpd::from_flat("Y", 2, vec![0.5, 0.5], vec![], vec![]).unwrap();
    assert!(cpd.with_states(vec![1.0]).is_err());
}

#[test]
fn column_index_is_last_fastest() {
    let cpd = TabularCpd::uniform("Y", 2, names(&["A", "B"]), vec![2, 3], vec![0.0, 1.0]).unwrap();
    assert_eq!(cpd.columns(), 6);
    assert_eq!(cpd.column_index(&[0, 2]), 2);
    assert_eq!(cpd.column_index(&[1, 0]), 3);
    assert_eq!(cpd.column_assignment(5), vec![1, 2]);
}

#[test]
fn deterministic_table_is_one_hot() {
    let cpd =
        TabularCpd::deterministic("D", 2, names(&["X"]), vec![2], vec![0.0, 1.0], &[1, 0]).unwrap();
    assert_eq!(cpd.values(), &[0.0, 1.0, 1.0, 0.0]);
    assert_eq!(cpd.deterministic_choice(0), Some(1));
    assert_eq!(cpd.deterministic_choice(1), Some(0));
    assert!(cpd.is_valid(0.0));

    let uniform = TabularCpd::uniform("D", 2, vec![], vec![], vec![0.0, 1.0]).unwrap();
    assert_eq!(uniform.deterministic_choice(0), None);
}

#[test]
fn tabular_serializes_through_json() {
    let cpd = TabularCpd::new("X", 2, vec![vec![0.25], vec![0.75]], vec![], vec![]).unwrap();
    let json = serde_json::to_string(&cpd).unwrap();
    let back: TabularCpd = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cpd);
}

#[test]
fn tabular_json_is_validated() {
    let short = r#"{"variable":"X","variable_card":2,"evidence":[],"evidence_card":[],"values":[1.0],"states":[0.0,1.0]}"#;
    let err = serde_json::from_str::<TabularCpd>(short).unwrap_err();
    assert!(err.to_string().contains("expected 2 values, got 1"), "{err}");

    let negative = r#"{"variable":"X","variable_card":2,"values":[1.5,-0.5]}"#;
    assert!(serde_json::from_str::<TabularCpd>(negative).is_err());

    let wrong_states = r#"{"variable":"X","variable_card":2,"values":[0.5,0.5],"states":[1.0]}"#;
    assert!(serde_json::from_str::<TabularCpd>(wrong_states).is_err());
}

#[test]
fn to_factor_keeps_layout() {
    let cpd = TabularCpd::new(
        "Y",
        2,
        vec![vec![0.9, 0.2], vec![0.1, 0.8]],
        names(&["X"]),
        vec![2],
    )
    .unwrap();
    let factor = cpd.to_factor();
    assert_eq!(factor.variables(), &names(&["Y", "X"])[..]);
    assert_eq!(factor.cardinality(), &[2, 2]);
    assert_eq!(factor.values(), cpd.values());
}

// =============================================================================
// Placeholder
// =============================================================================

#[test]
fn placeholder_materializes_uniform_over_graph_parents() {
    let view = MapView::default()
        .with_node("X", &[], Some(vec![0.0, 1.0, 2.0]))
        .with_node("D", &["X"], None);
    let mut cpd = PlaceholderCpd::new("D", 2).unwrap();
    assert!(cpd.table().is_none());
    assert!(cpd.materialize(&view).unwrap());

    let table = cpd.table().unwrap();
    assert_eq!(table.evidence(), &names(&["X"])[..]);
    assert_eq!(table.columns(), 3);
    assert!(table.values().iter().all(|&p| (p - 0.5).abs() < 1e-12));
}

#[test]
fn placeholder_defers_while_parent_unknown() {
    let view = MapView::default()
        .with_node("X", &[], None)
        .with_node("D", &["X"], None);
    let mut cpd = PlaceholderCpd::new("D", 2).unwrap();
    assert!(!cpd.materialize(&view).unwrap());
    assert!(matches!(
        cpd.to_tabular(),
        Err(DistributionError::NotMaterialized { .. })
    ));
}

#[test]
fn placeholder_needs_states() {
    assert!(PlaceholderCpd::new("D", 0).is_err());
}

#[test]
fn placeholder_json_is_validated() {
    let view = MapView::default()
        .with_node("X", &[], Some(vec![0.0, 1.0]))
        .with_node("D", &["X"], None);
    let mut cpd = PlaceholderCpd::new("D", 2).unwrap();
    cpd.materialize(&view).unwrap();
    let back: PlaceholderCpd = serde_json::from_str(&serde_json::to_string(&cpd).unwrap()).unwrap();
    assert_eq!(back, cpd);

    let empty = r#"{"variable":"D","states":[],"table":null}"#;
    assert!(serde_json::from_str::<PlaceholderCpd>(empty).is_err());

    let foreign = TabularCpd::new("E", 2, vec![vec![0.5], vec![0.5]], vec![], vec![]).unwrap();
    let mismatched = format!(
        r#"{{"variable":"D","states":[0.0,1.0],"table":{}}}"#,
        serde_json::to_string(&foreign).unwrap()
    );
    assert!(serde_json::from_str::<PlaceholderCpd>(&mismatched).is_err());
}

// =============================================================================
// Functional
// =============================================================================

#[test]
fn functional_copy_of_parent() {
    let view = MapView::default().with_node("X", &[], Some(vec![0.0, 1.0]));
    let mut cpd = FunctionalCpd::new("D", names(&["X"]), |pv| pv.values()[0]);
    assert_eq!(cpd.cardinality(), None);
    assert!(cpd.materialize(&view).unwrap());

    let table = cpd.to_tabular().unwrap();
    assert_eq!(table.states(), &[0.0, 1.0]);
    assert_eq!(table.deterministic_choice(0), Some(0));
    assert_eq!(table.deterministic_choice(1), Some(1));
    assert_eq!(cpd.cardinality(), Some(2));
}

#[test]
fn functional_derives_sorted_distinct_domain() {
    let cpd = FunctionalCpd::new("S", names(&["A", "B"]), |pv| {
        pv.get("A").unwrap_or(0.0) + pv.get("B").unwrap_or(0.0)
    });
    let table = cpd
        .evaluate(&[vec![0.0, 1.0], vec![0.0, 1.0]])
        .unwrap();
    assert_eq!(table.states(), &[0.0, 1.0, 2.0]);
    // Columns (A,B): 00 01 10 11 -> sums 0 1 1 2.
    let choices: Vec<_> = (0..4).map(|c| table.deterministic_choice(c)).collect();
    assert_eq!(choices, vec![Some(0), Some(1), Some(1), Some(2)]);
}

#[test]
fn functional_rejects_value_outside_declared_states() {
    let cpd = FunctionalCpd::new("D", vec![], |_| 5.0).with_states(vec![0.0, 1.0]);
    let err = cpd.evaluate(&[]).unwrap_err();
    assert!(matches!(err, DistributionError::ValueOutOfDomain { value, .. } if value == 5.0));
}

#[test]
fn functional_rejects_non_finite_output() {
    let cpd = FunctionalCpd::new("D", vec![], |_| f64::NAN);
    assert!(matches!(
        cpd.evaluate(&[]),
        Err(DistributionError::InvalidTable { .. })
    ));
}

#[test]
fn functional_declared_states_keep_unused_values() {
    let cpd = FunctionalCpd::new("D", vec![], |_| 1.0).with_states(vec![0.0, 1.0, 2.0]);
    let table = cpd.evaluate(&[]).unwrap();
    assert_eq!(table.variable_card(), 3);
    assert_eq!(table.deterministic_choice(0), Some(1));
}

#[test]
fn functional_index_lookup_by_name() {
    let cpd = FunctionalCpd::new("D", names(&["X"]), |pv| {
        pv.index_of("X").map(|i| i as f64 * 10.0).unwrap_or(-1.0)
    });
    let table = cpd.evaluate(&[vec![3.5, 7.5]]).unwrap();
    assert_eq!(table.states(), &[0.0, 10.0]);
}

#[test]
fn functional_defers_while_parent_states_unknown() {
    let view = MapView::default();
    let mut cpd = FunctionalCpd::new("D", names(&["X"]), |pv| pv.values()[0]);
    assert!(!cpd.materialize(&view).unwrap());
    assert!(cpd.table().is_none());
}

// =============================================================================
// Distribution
// =============================================================================

#[test]
fn distribution_reports_kind_and_scope() {
    let tab: Distribution = TabularCpd::new(
        "Y",
        2,
        vec![vec![0.5, 0.5], vec![0.5, 0.5]],
        names(&["X"]),
        vec![2],
    )
    .unwrap()
    .into();
    assert_eq!(tab.kind(), DistributionKind::Tabular);
    assert_eq!(tab.scope(), names(&["Y", "X"]));
    assert!(!tab.is_materializable());
    assert_eq!(tab.cardinality(), Some(2));

    let ph: Distribution = PlaceholderCpd::new("D", 3).unwrap().into();
    assert_eq!(ph.kind().to_string(), "placeholder");
    assert!(ph.is_materializable());
    assert_eq!(ph.scope(), names(&["D"]));
    assert_eq!(ph.cardinality(), Some(3));
}

#[test]
fn continuous_refuses_tabulation() {
    let cpd = ContinuousCpd::new("Z", names(&["X"]), |x, parents| (-(x - parents[0]).powi(2)).exp());
    assert_eq!(cpd.density(1.0, &[1.0]), 1.0);
    assert!(cpd.density(3.0, &[1.0]) < cpd.density(2.0, &[1.0]));

    let dist: Distribution = cpd.into();
    assert_eq!(dist.cardinality(), None);
    assert!(dist.as_tabular().is_none());
    match dist.to_tabular() {
        Err(DistributionError::Unsupported { kind, .. }) => assert_eq!(kind, "continuous"),
        other => panic!("expected unsupported, got {other:?}"),
    }
}

#[test]
fn materialize_is_noop_for_tabular() {
    let mut dist: Distribution = TabularCpd::from_flat("X", 2, vec![0.5, 0.5], vec![], vec![])
        .unwrap()
        .into();
    assert!(dist.materialize(&MapView::default()).unwrap());
    assert!(dist.as_tabular().is_some());
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn uniform_tables_are_valid(card in 1usize..5, ev in proptest::collection::vec(1usize..4, 0..3)) {
        let evidence: Vec<String> = (0..ev.len()).map(|i| format!("E{i}")).collect();
        let states = (0..card).map(|i| i as f64).collect();
        let cpd = TabularCpd::uniform("V", card, evidence, ev.clone(), states).unwrap();
        prop_assert!(cpd.is_valid(1e-9));
        prop_assert_eq!(cpd.columns(), ev.iter().product::<usize>());
    }

    #[test]
    fn column_index_round_trips(ev in proptest::collection::vec(1usize..4, 1..4), seed in any::<usize>()) {
        let evidence: Vec<String> = (0..ev.len()).map(|i| format!("E{i}")).collect();
        let cpd = TabularCpd::uniform("V", 2, evidence, ev, vec![0.0, 1.0]).unwrap();
        let column = seed % cpd.columns();
        prop_assert_eq!(cpd.column_index(&cpd.column_assignment(column)), column);
    }
}
