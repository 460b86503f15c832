//! Pricing routine contract.

use std::time::Duration;

use crate::error::RoutineError;
use crate::execution_log::ExecutionLog;
use crate::model::Column;

/// What the pricing routine sees at one column generation iteration.
#[derive(Debug, Clone, Copy)]
pub struct PricingContext<'a> {
    /// Dual values of the restricted relaxation, one per constraint.
    pub duals: &'a [f64],

    /// Objective value of the current restricted relaxation.
    pub incumbent_value: f64,

    /// Time left before the global limit (`Duration::MAX` when unlimited).
    pub time_remaining: Duration,

    /// 1-based iteration number.
    pub iteration: u64,
}

impl PricingContext<'_> {
    /// Dual value of constraint `row`, 0 if the relaxation reported none.
    pub fn dual(&self, row: usize) -> f64 {
        self.duals.get(row).copied().unwrap_or(0.0)
    }

    /// Reduced cost of a column against these duals (minimization).
    pub fn reduced_cost(&self, column: &Column) -> f64 {
        column.objective
            - column
                .entries
                .iter()
                .map(|&(row, coef)| coef * self.dual(row))
                .sum::<f64>()
    }
}

/// Generator of improving columns.
///
/// Returning no columns ends column generation with `Optimum`. Logs of
/// sub-solves (a labeling run, a branch-and-cut on the pricing problem)
/// can be pushed to `sub_logs`; they are attached to the iteration's entry.
pub trait PricingRoutine {
    /// Price out new columns for the duals in `ctx`.
    fn price(
        &mut self,
        ctx: &PricingContext<'_>,
        sub_logs: &mut Vec<ExecutionLog>,
    ) -> Result<Vec<Column>, RoutineError>;
}

impl<F> PricingRoutine for F
where
    F: FnMut(&PricingContext<'_>, &mut Vec<ExecutionLog>) -> Result<Vec<Column>, RoutineError>,
{
    fn price(
        &mut self,
        ctx: &PricingContext<'_>,
        sub_logs: &mut Vec<ExecutionLog>,
    ) -> Result<Vec<Column>, RoutineError> {
        self(ctx, sub_logs)
    }
}
