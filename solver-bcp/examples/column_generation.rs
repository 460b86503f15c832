//! Column generation on a one-row cutting stock relaxation.
//!
//! Demand for 4 units is covered by patterns of 1, 2 or 4 units. The
//! relaxation of a single covering row is solved exactly: everything goes
//! on the pattern with the best cost per unit, whose ratio is the dual.
//!
//! Run with: cargo run -p solver-bcp --example column_generation

use std::time::Duration;

use solver_bcp::execution_log::{CgOption, ExecutionLog, LogDocument, MlbExecutionLog, MlbStatus};
use solver_bcp::{
    Column, ColumnGeneration, ColumnGenerationSettings, Constraint, PricingContext,
    RelaxationResult, RelaxationSolver, RestrictedModel, RoutineError,
};

struct SingleRowCover;

impl RelaxationSolver for SingleRowCover {
    fn solve(
        &mut self,
        model: &RestrictedModel,
        _time_limit: Option<Duration>,
    ) -> Result<RelaxationResult, RoutineError> {
        let row = model.constraints().first().ok_or("model has no rows")?;
        let best = row
            .terms
            .iter()
            .filter(|(_, a)| *a > 0.0)
            .map(|&(v, a)| (v, a, model.variables()[v.index()].objective / a))
            .min_by(|x, y| x.2.total_cmp(&y.2));
        let Some((var, coef, ratio)) = best else {
            return Ok(RelaxationResult::infeasible());
        };

        let mut primal = vec![0.0; model.num_variables()];
        primal[var.index()] = row.rhs / coef;
        Ok(RelaxationResult::optimal(ratio * row.rhs, primal, vec![ratio]))
    }
}

/// Pattern catalogue: (name, cost, units).
const PATTERNS: [(&str, f64, f64); 3] = [("one", 3.0, 1.0), ("two", 5.0, 2.0), ("four", 8.0, 4.0)];

fn price(
    ctx: &PricingContext<'_>,
    sub_logs: &mut Vec<ExecutionLog>,
) -> Result<Vec<Column>, RoutineError> {
    let mut log = MlbExecutionLog::new();
    let mut columns = Vec::new();
    for (length, &(name, cost, units)) in PATTERNS.iter().enumerate() {
        log.enumerated_count += 1;
        let column = Column::new(name, cost, vec![(0, units)]);
        if ctx.reduced_cost(&column) < -1e-9 && columns.is_empty() {
            log.record_processed(length);
            columns.push(column);
        }
    }
    log.status = MlbStatus::Finished;
    sub_logs.push(log.into());
    Ok(columns)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Column generation ===\n");

    let mut model = RestrictedModel::new();
    let artificial = model.add_variable("artificial", 10.0, 0.0, f64::INFINITY);
    model.add_constraint(Constraint::geq(vec![(artificial, 1.0)], 4.0).with_name("demand"))?;

    let settings = ColumnGenerationSettings::default()
        .with_time_limit(10.0)
        .with_option(CgOption::IncumbentSolution);
    let mut cg = ColumnGeneration::new(model, SingleRowCover, settings);
    let mut pricing = price;

    loop {
        let outcome = cg.step(&mut pricing)?;
        if let Some(it) = cg.log().iterations.as_ref().and_then(|its| its.last()) {
            println!(
                "iter {}: obj = {:?}, columns added = {}",
                it.iteration, it.objective_value, it.column_count
            );
        }
        if let Some(status) = outcome {
            println!("\nstatus: {}", status);
            break;
        }
    }

    for (var, info) in cg.model().variables().iter().enumerate() {
        let value = cg
            .log()
            .incumbent
            .as_ref()
            .and_then(|x| x.as_slice().get(var).copied())
            .unwrap_or(0.0);
        println!("{:>10} = {:.2}", info.name, value);
    }

    println!("\n{}", serde_json::to_string_pretty(&cg.log().tagged())?);
    Ok(())
}
