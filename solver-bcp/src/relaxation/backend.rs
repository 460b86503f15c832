//! Relaxation solver trait and types.

use std::time::Duration;

use crate::error::RoutineError;
use crate::execution_log::CgStatus;
use crate::model::{RestrictedModel, Valuation};

/// Status of a relaxation solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxationStatus {
    /// Optimal solution found; objective, primal and duals are meaningful.
    Optimal,

    /// The restricted relaxation is infeasible.
    Infeasible,

    /// The restricted relaxation is unbounded.
    Unbounded,

    /// The solver ran out of time.
    TimeLimitReached,

    /// The solver ran out of memory.
    MemoryLimitReached,
}

impl RelaxationStatus {
    /// Terminal column generation status for a non-optimal solve.
    ///
    /// Returns None for `Optimal`, which does not end the loop.
    pub fn terminal_status(&self) -> Option<CgStatus> {
        match self {
            RelaxationStatus::Optimal => None,
            RelaxationStatus::Infeasible => Some(CgStatus::Infeasible),
            RelaxationStatus::Unbounded => Some(CgStatus::Unbounded),
            RelaxationStatus::TimeLimitReached => Some(CgStatus::TimeLimitReached),
            RelaxationStatus::MemoryLimitReached => Some(CgStatus::MemoryLimitReached),
        }
    }
}

/// Result from solving the restricted relaxation.
#[derive(Debug, Clone)]
pub struct RelaxationResult {
    /// Solve status.
    pub status: RelaxationStatus,

    /// Primal objective value.
    pub objective_value: f64,

    /// Primal solution, one value per model variable.
    pub primal: Valuation,

    /// Dual values, one per model constraint.
    pub duals: Vec<f64>,
}

impl RelaxationResult {
    /// Create an optimal result.
    pub fn optimal(objective_value: f64, primal: impl Into<Valuation>, duals: Vec<f64>) -> Self {
        Self {
            status: RelaxationStatus::Optimal,
            objective_value,
            primal: primal.into(),
            duals,
        }
    }

    /// Create a result carrying only a non-optimal status.
    pub fn with_status(status: RelaxationStatus) -> Self {
        let objective_value = match status {
            RelaxationStatus::Unbounded => f64::NEG_INFINITY,
            _ => f64::INFINITY,
        };
        Self {
            status,
            objective_value,
            primal: Valuation::default(),
            duals: Vec::new(),
        }
    }

    /// Create an infeasible result.
    pub fn infeasible() -> Self {
        Self::with_status(RelaxationStatus::Infeasible)
    }

    /// Create an unbounded result.
    pub fn unbounded() -> Self {
        Self::with_status(RelaxationStatus::Unbounded)
    }
}

/// Trait for relaxation solvers (LP backends) used by column generation.
///
/// The solver reads the restricted model as it is at the time of the call;
/// the loop grows the model between calls. An `Err` is a hard failure (the
/// solver produced nothing); infeasibility and resource exhaustion are
/// reported through [`RelaxationStatus`].
pub trait RelaxationSolver {
    /// Solve the linear relaxation of `model` within `time_limit`.
    fn solve(
        &mut self,
        model: &RestrictedModel,
        time_limit: Option<Duration>,
    ) -> Result<RelaxationResult, RoutineError>;
}

impl<F> RelaxationSolver for F
where
    F: FnMut(&RestrictedModel, Option<Duration>) -> Result<RelaxationResult, RoutineError>,
{
    fn solve(
        &mut self,
        model: &RestrictedModel,
        time_limit: Option<Duration>,
    ) -> Result<RelaxationResult, RoutineError> {
        self(model, time_limit)
    }
}
