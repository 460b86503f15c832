//! Separation rounds on the stable set polytope of a 5-cycle
//! (maximization written as min -sum x).
//!
//! Edge inequalities are tried first; the odd-hole inequality is only
//! attempted when no edge inequality is violated.
//!
//! Run with: cargo run -p solver-bcp --example separation

use solver_bcp::cuts::StrategyConfig;
use solver_bcp::execution_log::{BcOption, BcStatus, LogDocument};
use solver_bcp::{
    BranchAndCutSession, BranchAndCutSettings, Constraint, RoutineError, Valuation, Variable,
};

const STRATEGY: &str = r#"{
    "families": [
        { "name": "edge", "cuts_per_iteration": 3 },
        { "name": "odd-hole", "node_limit": 10, "cut_limit": 1 }
    ],
    "dependencies": [ { "from": "edge", "to": "odd-hole" } ]
}"#;

const N: usize = 5;

fn edges() -> impl Iterator<Item = (usize, usize)> {
    (0..N).map(|i| (i, (i + 1) % N))
}

fn edge_cuts(
    x: &Valuation,
    _node: u64,
    cap: usize,
    _bound: f64,
) -> Result<Vec<Constraint>, RoutineError> {
    Ok(edges()
        .map(|(i, j)| {
            Constraint::leq(vec![(Variable(i), 1.0), (Variable(j), 1.0)], 1.0)
                .with_name(format!("edge_{i}_{j}"))
        })
        .filter(|c| c.is_violated(x, 1e-6))
        .take(cap)
        .collect())
}

fn odd_hole_cuts(
    x: &Valuation,
    _node: u64,
    _cap: usize,
    _bound: f64,
) -> Result<Vec<Constraint>, RoutineError> {
    let hole = Constraint::leq((0..N).map(|i| (Variable(i), 1.0)).collect(), 2.0)
        .with_name("hole_0_4");
    Ok(if hole.is_violated(x, 1e-6) {
        vec![hole]
    } else {
        Vec::new()
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Separation on C5 ===\n");

    let mut strategy = StrategyConfig::from_json_str(STRATEGY)?.build()?;
    strategy.set_routine("edge", edge_cuts)?;
    strategy.set_routine("odd-hole", odd_hole_cuts)?;

    let settings = BranchAndCutSettings::default()
        .with_max_nodes(3)
        .with_option(BcOption::CutInformation)
        .with_option(BcOption::RootInformation);
    let mut session = BranchAndCutSession::new(strategy, settings)?;
    session.start(0, N);

    let points = [0.6, 0.45, 0.4];
    for (node, &value) in points.iter().enumerate() {
        let x = Valuation::new(vec![value; N]);
        let round = session.separate(&x, node as u64, -5.0 * value)?;
        println!(
            "node {}: x = {:.2} -> {} cuts",
            node,
            value,
            round.cuts.len()
        );
        for cut in &round.cuts {
            println!(
                "  {} (violation {:.2})",
                cut.name.as_deref().unwrap_or("?"),
                cut.violation(&x)
            );
        }
        for (id, reason) in &round.skipped {
            let name = session.strategy().get(*id).map_or("?", |f| f.name());
            println!("  skipped {}: {:?}", name, reason);
        }

        if node == 0 {
            session.set_root_relaxation(-5.0 * value);
        }
        session.node_closed();
        if let Some(status) = session.check_termination(0) {
            println!("stopping: {}", status);
            break;
        }
    }

    session.update_incumbent(&Valuation::new(vec![1.0, 0.0, 1.0, 0.0, 0.0]), -2.0);
    let log = session.finalize(BcStatus::NodeLimitReached, 0);
    println!("\n{}", serde_json::to_string_pretty(&log.tagged())?);
    Ok(())
}
