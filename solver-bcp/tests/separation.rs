//! Integration tests for cut separation and branch-and-cut sessions.

use std::cell::Cell;
use std::rc::Rc;

use solver_bcp::cuts::{LimitKind, SeparationStrategy, SkipReason, StrategyConfig};
use solver_bcp::execution_log::{BcOption, BcStatus, LogDocument};
use solver_bcp::{
    BcpError, BranchAndCutSession, BranchAndCutSettings, Constraint, RoutineError, Valuation,
    Variable,
};

/// Routine returning `count` copies of a tagged cut and counting its calls.
fn fixed_routine(
    tag: f64,
    count: usize,
    calls: Rc<Cell<u32>>,
) -> impl FnMut(&Valuation, u64, usize, f64) -> Result<Vec<Constraint>, RoutineError> {
    move |_x, _node, _cap, _bound| {
        calls.set(calls.get() + 1);
        Ok(vec![Constraint::leq(vec![(Variable(0), 1.0)], tag); count])
    }
}

#[test]
fn test_prerequisite_with_cut_limit_blocks_dependent() {
    let mut strategy = SeparationStrategy::new();
    strategy.register_family("A").unwrap();
    strategy.register_family("B").unwrap();
    strategy.set_limit("A", LimitKind::Cut, 1).unwrap();
    strategy.add_dependency("A", "B").unwrap();

    let a_calls = Rc::new(Cell::new(0));
    let b_calls = Rc::new(Cell::new(0));
    strategy
        .set_routine("A", fixed_routine(1.0, 1, a_calls.clone()))
        .unwrap();
    strategy
        .set_routine("B", fixed_routine(2.0, 1, b_calls.clone()))
        .unwrap();

    let round = strategy
        .separate(&Valuation::new(vec![0.5]), 0, None, 0.0)
        .unwrap();

    assert_eq!(round.cuts.len(), 1);
    assert_eq!(round.cuts[0].rhs, 1.0);
    assert_eq!(strategy.family("A").unwrap().stats().cuts_added, 1);
    assert_eq!(b_calls.get(), 0);
    let b = strategy.id("B").unwrap();
    assert_eq!(
        round.skip_reason(b),
        Some(SkipReason::Dependency {
            prerequisite: strategy.id("A").unwrap()
        })
    );

    // A is exhausted now, so B becomes the fallback.
    let round = strategy
        .separate(&Valuation::new(vec![0.5]), 1, None, 0.0)
        .unwrap();
    assert_eq!(a_calls.get(), 1);
    assert_eq!(b_calls.get(), 1);
    assert_eq!(round.cuts.len(), 1);
    assert_eq!(round.cuts[0].rhs, 2.0);
    assert_eq!(strategy.family("A").unwrap().stats().cuts_added, 1);
}

#[test]
fn test_failing_routine_aborts_round() {
    let mut strategy = SeparationStrategy::new();
    strategy.register_family("first").unwrap();
    strategy.register_family("broken").unwrap();
    strategy.register_family("last").unwrap();

    let last_calls = Rc::new(Cell::new(0));
    strategy
        .set_routine("first", fixed_routine(1.0, 2, Rc::new(Cell::new(0))))
        .unwrap();
    strategy
        .set_routine(
            "broken",
            |_x: &Valuation, _n: u64, _c: usize, _b: f64| -> Result<Vec<Constraint>, RoutineError> {
                Err("conflict graph missing".into())
            },
        )
        .unwrap();
    strategy
        .set_routine("last", fixed_routine(3.0, 1, last_calls.clone()))
        .unwrap();

    let err = strategy
        .separate(&Valuation::new(vec![0.5]), 4, None, 0.0)
        .unwrap_err();
    match err {
        BcpError::SeparationFailure {
            family, iteration, ..
        } => {
            assert_eq!(family, "broken");
            assert_eq!(iteration, 1);
        }
        other => panic!("unexpected error: {other}"),
    }

    // Work done before the failure is kept.
    assert_eq!(strategy.family("first").unwrap().stats().cuts_added, 2);
    assert_eq!(strategy.family("broken").unwrap().stats().iterations_run, 1);
    assert_eq!(strategy.family("broken").unwrap().stats().cuts_added, 0);
    assert_eq!(last_calls.get(), 0);
}

#[test]
fn test_round_budget_spans_families() {
    let mut strategy = SeparationStrategy::new();
    for name in ["a", "b", "c"] {
        strategy.register_family(name).unwrap();
        strategy
            .set_routine(name, fixed_routine(0.0, 2, Rc::new(Cell::new(0))))
            .unwrap();
    }

    let round = strategy
        .separate(&Valuation::new(vec![0.0]), 0, Some(3), 0.0)
        .unwrap();
    assert_eq!(round.cuts.len(), 3);
    assert!(round.budget_exhausted);
    let caps: Vec<usize> = round.invoked.iter().map(|inv| inv.cap).collect();
    assert_eq!(caps, vec![3, 1]);
    assert!(!round.was_invoked(strategy.id("c").unwrap()));
}

#[test]
fn test_identical_runs_are_deterministic() {
    let build = || {
        let config = StrategyConfig::from_json_str(
            r#"{
                "families": [
                    { "name": "clique", "cuts_per_iteration": 2 },
                    { "name": "odd-hole", "node_limit": 3 },
                    { "name": "cover" }
                ],
                "dependencies": [ { "from": "cover", "to": "clique" } ]
            }"#,
        )
        .unwrap();
        let mut strategy = config.build().unwrap();
        strategy
            .set_routine(
                "clique",
                |x: &Valuation, node: u64, cap: usize, _b: f64| -> Result<Vec<Constraint>, RoutineError> {
                    let n = (node as usize + x.len()) % 4;
                    Ok(vec![Constraint::leq(vec![(Variable(0), 1.0)], node as f64); n.min(cap)])
                },
            )
            .unwrap();
        strategy
            .set_routine(
                "odd-hole",
                |_x: &Valuation, node: u64, _c: usize, _b: f64| -> Result<Vec<Constraint>, RoutineError> {
                    Ok(vec![Constraint::geq(vec![(Variable(0), 1.0)], node as f64)])
                },
            )
            .unwrap();
        strategy
            .set_routine(
                "cover",
                |_x: &Valuation, node: u64, _c: usize, _b: f64| -> Result<Vec<Constraint>, RoutineError> {
                    if node % 2 == 0 {
                        Ok(vec![Constraint::eq(vec![(Variable(0), 1.0)], 0.0)])
                    } else {
                        Ok(Vec::new())
                    }
                },
            )
            .unwrap();
        strategy
    };

    let mut first = build();
    let mut second = build();
    let x = Valuation::new(vec![0.2, 0.8]);
    for node in 0..6 {
        let r1 = first.separate(&x, node, Some(4), 0.0).unwrap();
        let r2 = second.separate(&x, node, Some(4), 0.0).unwrap();
        assert_eq!(r1.cuts, r2.cuts);
        let f1: Vec<_> = r1.invoked.iter().map(|inv| (inv.family, inv.cuts)).collect();
        let f2: Vec<_> = r2.invoked.iter().map(|inv| (inv.family, inv.cuts)).collect();
        assert_eq!(f1, f2);
        assert_eq!(r1.skipped, r2.skipped);
    }
    for (a, b) in first.families().zip(second.families()) {
        assert_eq!(a.stats().cuts_added, b.stats().cuts_added);
        assert_eq!(a.stats().iterations_run, b.stats().iterations_run);
    }
}

#[test]
fn test_session_log_document() {
    let mut strategy = SeparationStrategy::new();
    strategy.register_family("clique").unwrap();
    strategy.register_family("odd-hole").unwrap();
    strategy.add_dependency("clique", "odd-hole").unwrap();
    strategy
        .set_routine("clique", fixed_routine(1.0, 2, Rc::new(Cell::new(0))))
        .unwrap();
    strategy
        .set_routine("odd-hole", fixed_routine(2.0, 1, Rc::new(Cell::new(0))))
        .unwrap();

    let settings = BranchAndCutSettings::default()
        .with_max_nodes(2)
        .with_option(BcOption::CutInformation)
        .with_option(BcOption::RootInformation);
    let mut session = BranchAndCutSession::new(strategy, settings).unwrap();
    session.start(3, 2);

    let x = Valuation::new(vec![0.5, 0.5]);
    let round = session.separate(&x, 0, 1.0).unwrap();
    assert_eq!(round.cuts.len(), 2);
    session.set_root_relaxation(1.5);
    session.update_incumbent(&Valuation::new(vec![1.0, 0.0]), 2.0);
    session.node_closed();
    assert_eq!(session.check_termination(1), None);

    session.separate(&x, 1, 1.5).unwrap();
    session.update_best_bound(1.75);
    session.node_closed();
    let status = session.check_termination(1).unwrap();
    assert_eq!(status, BcStatus::NodeLimitReached);

    let log = session.finalize(status, 1);
    let json = log.to_json();
    assert_eq!(json["kd_type"], "bc");
    assert_eq!(json["status"], "NodeLimitReached");
    assert_eq!(json["constraint_count"], 3);
    assert_eq!(json["nodes_closed"], 2);
    assert_eq!(json["nodes_open"], 1);
    assert_eq!(json["best_bound"], 1.75);
    assert_eq!(json["best_int_value"], 2.0);
    assert_eq!(json["root_lp_value"], 1.5);
    assert_eq!(json["root_int_value"], 2.0);
    assert_eq!(json["cut_count"], 4);
    assert_eq!(json["cut_families"][0]["name"], "clique");
    assert_eq!(json["cut_families"][0]["cut_iterations"], 2);
    assert_eq!(json["cut_families"][1]["name"], "odd-hole");
    assert_eq!(json["cut_families"][1]["cut_iterations"], 0);
    assert!(json.get("best_int_solution").is_none());
    assert!(json["time"].is_number());
}
