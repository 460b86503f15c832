//! Column generation log.

use std::time::Duration;

use serde::Serialize;

use super::{secs, ExecutionLog, LogDocument};
use crate::model::Valuation;

/// Terminal status of a column generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum CgStatus {
    /// The run has not finished (or not started).
    #[default]
    DidNotStart,

    /// The restricted relaxation is infeasible.
    Infeasible,

    /// The restricted relaxation is unbounded.
    Unbounded,

    /// Stopped by the time limit.
    TimeLimitReached,

    /// Stopped by the relaxation solver's memory limit.
    MemoryLimitReached,

    /// Pricing found no improving column.
    Optimum,
}

status_display!(CgStatus {
    DidNotStart,
    Infeasible,
    Unbounded,
    TimeLimitReached,
    MemoryLimitReached,
    Optimum,
});

/// One relaxation solve plus the pricing call that followed it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CgIterationLog {
    /// 1-based iteration number.
    pub iteration: u64,

    /// Relaxation objective, when the relaxation was solved to optimality.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective_value: Option<f64>,

    /// Total time of the iteration.
    #[serde(with = "secs")]
    pub time: Duration,

    /// Time in the relaxation solver.
    #[serde(with = "secs")]
    pub lp_time: Duration,

    /// Time in the pricing routine.
    #[serde(with = "secs")]
    pub pricing_time: Duration,

    /// Columns added to the restricted model.
    pub column_count: u64,

    /// Logs appended by the pricing routine.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pricing_logs: Vec<ExecutionLog>,
}

/// Statistics of a column generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CgExecutionLog {
    /// Terminal status.
    pub status: CgStatus,

    /// Total time.
    #[serde(with = "secs")]
    pub time: Duration,

    /// Relaxation solves performed.
    pub iteration_count: u64,

    /// Time in the relaxation solver.
    #[serde(with = "secs")]
    pub lp_time: Duration,

    /// Time in the pricing routine.
    #[serde(with = "secs")]
    pub pricing_time: Duration,

    /// Columns added over the run.
    pub columns_added: u64,

    /// Objective value of the last optimal relaxation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incumbent_value: Option<f64>,

    /// Solution of the last optimal relaxation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incumbent: Option<Valuation>,

    /// Per-iteration entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<Vec<CgIterationLog>>,
}

impl CgExecutionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a terminal status has been set.
    pub fn is_finished(&self) -> bool {
        self.status != CgStatus::DidNotStart
    }
}

impl LogDocument for CgExecutionLog {
    const KD_TYPE: &'static str = "cg";
}
