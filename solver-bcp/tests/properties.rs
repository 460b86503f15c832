//! Property-based tests for the separation scheduler.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use solver_bcp::cuts::{DependencyGraph, LimitKind, SeparationStrategy};
use solver_bcp::{BcpError, Constraint, RoutineError, Valuation, Variable};

/// Strategy of `n` families whose routines replay `outputs[family]`
/// cyclically and record (family, node) for every call.
fn replay_strategy(
    outputs: &[Vec<usize>],
    calls: &Rc<RefCell<Vec<(usize, u64)>>>,
) -> SeparationStrategy {
    let mut strategy = SeparationStrategy::new();
    for (i, counts) in outputs.iter().enumerate() {
        let name = format!("f{i}");
        strategy.register_family(name.as_str()).unwrap();
        let counts = counts.clone();
        let calls = calls.clone();
        let mut round = 0usize;
        strategy
            .set_routine(
                &name,
                move |_x: &Valuation,
                      node: u64,
                      _cap: usize,
                      _bound: f64|
                      -> Result<Vec<Constraint>, RoutineError> {
                    calls.borrow_mut().push((i, node));
                    let n = counts[round % counts.len()];
                    round += 1;
                    Ok(vec![Constraint::leq(vec![(Variable(0), 1.0)], i as f64); n])
                },
            )
            .unwrap();
    }
    strategy
}

fn family_outputs() -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(prop::collection::vec(0usize..4, 1..5), 1..6)
}

proptest! {
    /// Accepted edges always leave a valid topological order; rejected
    /// edges leave the graph untouched.
    #[test]
    fn order_respects_accepted_edges(
        n in 1usize..10,
        edges in prop::collection::vec((0usize..10, 0usize..10), 0..40),
    ) {
        let mut graph = DependencyGraph::new();
        for _ in 0..n {
            graph.add_node();
        }

        for (from, to) in edges {
            let (from, to) = (from % n, to % n);
            let before = graph.edge_count();
            let order_before = graph.topological_order();
            match graph.try_add_edge(from, to) {
                Ok(_) => prop_assert!(graph.has_edge(from, to)),
                Err(_) => {
                    prop_assert!(from == to || graph.reaches(to, from));
                    prop_assert_eq!(graph.edge_count(), before);
                    prop_assert!(!graph.has_edge(from, to));
                    prop_assert_eq!(graph.topological_order(), order_before);
                }
            }
        }

        let order = graph.topological_order();
        prop_assert_eq!(order.len(), n);
        let mut position = vec![0; n];
        for (i, &node) in order.iter().enumerate() {
            position[node] = i;
        }
        for node in 0..n {
            for &succ in graph.successors(node) {
                prop_assert!(position[node] < position[succ]);
            }
        }
    }

    /// A family is never called at a node above its node limit.
    #[test]
    fn node_limit_is_respected(
        outputs in family_outputs(),
        limit in 0u64..6,
        nodes in prop::collection::vec(0u64..12, 1..20),
    ) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut strategy = replay_strategy(&outputs, &calls);
        strategy.set_limit("f0", LimitKind::Node, limit).unwrap();

        for node in nodes {
            strategy.separate(&Valuation::new(vec![0.5]), node, None, 0.0).unwrap();
        }
        for &(family, node) in calls.borrow().iter() {
            if family == 0 {
                prop_assert!(node <= limit);
            }
        }
    }

    /// Cut totals never exceed the cut limit, whatever the routines return.
    #[test]
    fn cut_limit_is_respected(
        outputs in family_outputs(),
        limit in 0u64..8,
        per_call in prop::option::of(0u64..3),
        budget in prop::option::of(0usize..5),
        rounds in 1usize..15,
    ) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut strategy = replay_strategy(&outputs, &calls);
        for i in 0..outputs.len() {
            let name = format!("f{i}");
            strategy.set_limit(&name, LimitKind::Cut, limit).unwrap();
            if let Some(k) = per_call {
                strategy.set_limit(&name, LimitKind::CutsPerIteration, k).unwrap();
            }
        }

        for node in 0..rounds as u64 {
            let round = strategy.separate(&Valuation::new(vec![0.5]), node, budget, 0.0).unwrap();
            if let Some(budget) = budget {
                prop_assert!(round.cuts.len() <= budget);
            }
            for family in strategy.families() {
                prop_assert!(family.stats().cuts_added <= limit);
            }
        }
    }

    /// A dependent family runs in a round exactly when none of its
    /// prerequisites produced cuts in that round (and its own limits allow).
    #[test]
    fn dependent_runs_only_as_fallback(
        outputs in family_outputs(),
        edges in prop::collection::vec((0usize..6, 0usize..6), 0..10),
        rounds in 1usize..8,
    ) {
        let n = outputs.len();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut strategy = replay_strategy(&outputs, &calls);
        for (from, to) in edges {
            let (from, to) = (from % n, to % n);
            match strategy.add_dependency(&format!("f{from}"), &format!("f{to}")) {
                Ok(()) | Err(BcpError::Cycle { .. }) => {}
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
        }

        for node in 0..rounds as u64 {
            let round = strategy.separate(&Valuation::new(vec![0.5]), node, None, 0.0).unwrap();
            let produced: Vec<bool> = (0..n)
                .map(|i| round.invoked.iter().any(|inv| inv.family.0 == i && inv.cuts > 0))
                .collect();

            for id in strategy.order().to_vec() {
                let blocked = strategy.dependencies(id).any(|p| produced[p.0]);
                if blocked {
                    prop_assert!(!round.was_invoked(id));
                } else {
                    // No limits are set, so an unblocked family always runs.
                    prop_assert!(round.was_invoked(id));
                }
            }
        }
    }
}
