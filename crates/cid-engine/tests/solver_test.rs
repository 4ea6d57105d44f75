//! Tests for the policy solver: matching scenarios, backward induction, determinism,
//! freezing, degenerate contexts, parallel evaluation.

use std::sync::Arc;

use cid_core::{Context, SolverConfig, SolverEvent};
use cid_cpd::{Distribution, PlaceholderCpd, TabularCpd};
use cid_engine::{CausalInfluenceDiagram, RecordingObserver};

const NONE: [&str; 0] = [];

fn coin(name: &str) -> Distribution {
    TabularCpd::new(name, 2, vec![vec![0.5], vec![0.5]], vec![], vec![])
        .unwrap()
        .into()
}

/// `U = 1` iff `D == X`, with evidence ordered `[X, D]`.
fn match_utility() -> Distribution {
    TabularCpd::new(
        "U",
        2,
        vec![vec![0.0, 1.0, 1.0, 0.0], vec![1.0, 0.0, 0.0, 1.0]],
        vec!["X".into(), "D".into()],
        vec![2, 2],
    )
    .unwrap()
    .into()
}

fn matching(observed: bool) -> CausalInfluenceDiagram {
    let mut edges = vec![("X", "U"), ("D", "U")];
    if observed {
        edges.push(("X", "D"));
    }
    let mut cid = CausalInfluenceDiagram::new(&edges, &["D"], &["U"]).unwrap();
    cid.add_distributions([
        coin("X"),
        PlaceholderCpd::new("D", 2).unwrap().into(),
        match_utility(),
    ])
    .unwrap();
    cid
}

/// `D1 -> D2 -> U` and `D1 -> U`, with `U = D1 + [D2 == D1]`.
fn two_stage() -> CausalInfluenceDiagram {
    let mut cid = CausalInfluenceDiagram::new(
        &[("D1", "D2"), ("D1", "U"), ("D2", "U")],
        &["D1", "D2"],
        &["U"],
    )
    .unwrap();
    cid.add_distributions([
        Distribution::from(PlaceholderCpd::new("D1", 2).unwrap()),
        PlaceholderCpd::new("D2", 2).unwrap().into(),
        TabularCpd::new(
            "U",
            3,
            vec![
                vec![0.0, 1.0, 0.0, 0.0],
                vec![1.0, 0.0, 1.0, 0.0],
                vec![0.0, 0.0, 0.0, 1.0],
            ],
            vec!["D1".into(), "D2".into()],
            vec![2, 2],
        )
        .unwrap()
        .into(),
    ])
    .unwrap();
    cid
}

// =============================================================================
// Matching scenarios
// =============================================================================

#[test]
fn unobserved_matching_ties_to_first_action() {
    let mut cid = matching(false);
    let policy = cid.solve().unwrap();
    let d = &policy["D"];
    assert!(d.evidence().is_empty());
    assert_eq!(d.values(), &[1.0, 0.0]);

    cid.impute_optimal_policy().unwrap();
    let eu = cid.expected_utility(&Context::new()).unwrap();
    assert!((eu - 0.5).abs() < 1e-12, "eu = {eu}");
}

#[test]
fn observed_matching_copies_observation() {
    let mut cid = matching(true);
    cid.impute_optimal_policy().unwrap();

    let d = cid.policy().remove("D").unwrap();
    assert_eq!(d.evidence(), &["X".to_string()]);
    for x in 0..2 {
        assert_eq!(d.deterministic_choice(d.column_index(&[x])), Some(x));
    }
    let eu = cid.expected_utility(&Context::new()).unwrap();
    assert!((eu - 1.0).abs() < 1e-12, "eu = {eu}");
}

#[test]
fn optimal_actions_reports_full_tie() {
    let cid = matching(false);
    assert_eq!(cid.optimal_actions("D", &Context::new()).unwrap(), vec![0, 1]);

    let observed = matching(true);
    let ctx = Context::new().with("X", 1);
    assert_eq!(observed.optimal_actions("D", &ctx).unwrap(), vec![1]);
}

// =============================================================================
// Backward induction
// =============================================================================

#[test]
fn later_decision_is_optimal_in_every_context() {
    let cid = two_stage();
    let policy = cid.solve().unwrap();

    let d2 = &policy["D2"];
    assert_eq!(d2.deterministic_choice(d2.column_index(&[0])), Some(0));
    assert_eq!(d2.deterministic_choice(d2.column_index(&[1])), Some(1));

    let d1 = &policy["D1"];
    assert_eq!(d1.deterministic_choice(0), Some(1));
}

#[test]
fn solved_two_stage_reaches_best_utility() {
    let mut cid = two_stage();
    cid.impute_optimal_policy().unwrap();
    assert!(cid.is_solved());
    let eu = cid.expected_utility(&Context::new()).unwrap();
    assert!((eu - 2.0).abs() < 1e-12, "eu = {eu}");

    // Off the equilibrium path D2 still best-responds. D1 is randomized first so that
    // D1=0 has positive probability.
    let mut off_path = cid.clone();
    off_path.impute_random_decision("D1").unwrap();
    let eu = off_path.expected_utility(&Context::new().with("D1", 0)).unwrap();
    assert!((eu - 1.0).abs() < 1e-12);
}

#[test]
fn subgame_perfect_rule_cannot_be_improved_per_context() {
    let mut cid = two_stage();
    cid.impute_optimal_policy().unwrap();
    let d2 = cid.policy()["D2"].clone();

    for d1 in 0..2 {
        let chosen = d2.deterministic_choice(d2.column_index(&[d1])).unwrap();
        let mut neutral = cid.clone();
        neutral.impute_random_policy().unwrap();
        let value = |a: usize| {
            neutral
                .expected_utility(&Context::new().with("D1", d1).with("D2", a))
                .unwrap()
        };
        for alternative in 0..2 {
            assert!(value(chosen) + 1e-12 >= value(alternative));
        }
    }
}

// =============================================================================
// Determinism and isolation
// =============================================================================

#[test]
fn solve_is_bit_identical_across_runs() {
    let cid = two_stage();
    let first = cid.solve().unwrap();
    let second = cid.solve().unwrap();
    assert_eq!(first, second);

    let rebuilt = two_stage().solve().unwrap();
    assert_eq!(first, rebuilt);
}

#[test]
fn solve_leaves_caller_model_untouched() {
    let cid = matching(true);
    let _ = cid.solve().unwrap();
    assert!(!cid.is_solved());
    assert!(matches!(
        cid.distribution("D"),
        Some(Distribution::Placeholder(_))
    ));
}

#[test]
fn failed_imputation_leaves_model_untouched() {
    let mut cid = CausalInfluenceDiagram::new(&[("X", "D"), ("D", "U")], &["D"], &["U"]).unwrap();
    cid.add_distributions([Distribution::from(PlaceholderCpd::new("D", 2).unwrap())])
        .unwrap();
    // X and U have no distributions, so the solver cannot size D's contexts.
    assert!(cid.impute_optimal_policy().is_err());
    assert!(matches!(
        cid.distribution("D"),
        Some(Distribution::Placeholder(_))
    ));
}

#[test]
fn parallel_contexts_match_sequential() {
    let sequential = matching(true).solve().unwrap();
    let config = SolverConfig {
        parallel_contexts: true,
        ..SolverConfig::default()
    };
    let parallel = matching(true).with_config(config).unwrap().solve().unwrap();
    assert_eq!(sequential, parallel);
}

// =============================================================================
// Freezing
// =============================================================================

#[test]
fn freezing_twice_changes_nothing() {
    let mut cid = matching(true);
    cid.impute_optimal_policy().unwrap();
    let before = cid.policy();

    cid.freeze_policy("D").unwrap();
    cid.freeze_policy("D").unwrap();
    assert_eq!(cid.policy(), before);
}

#[test]
fn freezing_placeholder_commits_uniform_table() {
    let mut cid = matching(true);
    cid.freeze_policy("D").unwrap();
    let policy = cid.policy();
    let d = &policy["D"];
    assert_eq!(d.evidence(), &["X".to_string()]);
    assert!(d.values().iter().all(|&p| (p - 0.5).abs() < 1e-12));
}

// =============================================================================
// Degenerate contexts
// =============================================================================

#[test]
fn impossible_context_marks_all_actions_optimal() {
    let observer = Arc::new(RecordingObserver::new());
    // X is always 0, so the context X=1 has probability zero.
    let mut cid = CausalInfluenceDiagram::new(&[("X", "D"), ("X", "U"), ("D", "U")], &["D"], &["U"])
        .unwrap()
        .with_observer(observer.clone());
    cid.add_distributions([
        Distribution::from(TabularCpd::new("X", 2, vec![vec![1.0], vec![0.0]], vec![], vec![]).unwrap()),
        PlaceholderCpd::new("D", 2).unwrap().into(),
        match_utility(),
    ])
    .unwrap();

    let policy = cid.solve().unwrap();
    let d = &policy["D"];
    assert_eq!(d.deterministic_choice(d.column_index(&[0])), Some(0));
    assert_eq!(d.deterministic_choice(d.column_index(&[1])), Some(0));

    let events = observer.events();
    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0],
        SolverEvent::AllActionsOptimal {
            decision: "D".into(),
            context: Context::new().with("X", 1),
        }
    );
}

/// `X` has eight states but is always 0; `D` sees `X`; `U` copies `D`.
fn mostly_impossible(parallel: bool, observer: Arc<RecordingObserver>) -> CausalInfluenceDiagram {
    let config = SolverConfig {
        parallel_contexts: parallel,
        ..SolverConfig::default()
    };
    let mut x = vec![vec![0.0]; 8];
    x[0][0] = 1.0;
    let mut cid = CausalInfluenceDiagram::new(&[("X", "D"), ("D", "U")], &["D"], &["U"])
        .unwrap()
        .with_config(config)
        .unwrap()
        .with_observer(observer);
    cid.add_distributions([
        Distribution::from(TabularCpd::new("X", 8, x, vec![], vec![]).unwrap()),
        PlaceholderCpd::new("D", 2).unwrap().into(),
        TabularCpd::new("U", 2, vec![vec![1.0, 0.0], vec![0.0, 1.0]], vec!["D".into()], vec![2])
            .unwrap()
            .into(),
    ])
    .unwrap();
    cid
}

#[test]
fn degenerate_context_events_follow_context_order() {
    let expected: Vec<SolverEvent> = (1..8)
        .map(|x| SolverEvent::AllActionsOptimal {
            decision: "D".into(),
            context: Context::new().with("X", x),
        })
        .collect();

    for parallel in [false, true] {
        let observer = Arc::new(RecordingObserver::new());
        let policy = mostly_impossible(parallel, observer.clone()).solve().unwrap();
        assert_eq!(observer.events(), expected, "parallel = {parallel}");

        let d = &policy["D"];
        assert_eq!(d.deterministic_choice(d.column_index(&[0])), Some(1));
        for x in 1..8 {
            assert_eq!(d.deterministic_choice(d.column_index(&[x])), Some(0));
        }
    }
}

#[test]
fn no_utilities_means_every_action_ties() {
    let mut cid = CausalInfluenceDiagram::new(&[("X", "D")], &["D"], &NONE).unwrap();
    cid.add_distributions([coin("X"), PlaceholderCpd::new("D", 3).unwrap().into()])
        .unwrap();
    let policy = cid.solve().unwrap();
    let d = &policy["D"];
    assert_eq!(d.deterministic_choice(0), Some(0));
    assert_eq!(d.deterministic_choice(1), Some(0));
    assert_eq!(cid.expected_utility(&Context::new()).unwrap(), 0.0);
}

#[test]
fn tie_tolerance_absorbs_small_differences() {
    // U favours D=1 by 1e-6 of probability mass.
    let build = |tolerance: f64| {
        let config = SolverConfig {
            tie_tolerance: tolerance,
            ..SolverConfig::default()
        };
        let mut cid = CausalInfluenceDiagram::new(&[("D", "U")], &["D"], &["U"])
            .unwrap()
            .with_config(config)
            .unwrap();
        cid.add_distributions([
            Distribution::from(PlaceholderCpd::new("D", 2).unwrap()),
            TabularCpd::new(
                "U",
                2,
                vec![vec![0.5, 0.5 - 1e-6], vec![0.5, 0.5 + 1e-6]],
                vec!["D".into()],
                vec![2],
            )
            .unwrap()
            .into(),
        ])
        .unwrap();
        cid
    };

    let strict = build(1e-9).solve().unwrap();
    assert_eq!(strict["D"].deterministic_choice(0), Some(1));

    let loose = build(1e-3).solve().unwrap();
    assert_eq!(loose["D"].deterministic_choice(0), Some(0));
}
