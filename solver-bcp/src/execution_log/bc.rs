//! Branch-and-cut log.

use std::time::Duration;

use serde::Serialize;

use super::{secs, LogDocument};
use crate::model::Valuation;

/// Terminal status of a branch-and-cut run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum BcStatus {
    /// The run has not finished (or not started).
    #[default]
    DidNotStart,

    /// The problem is infeasible.
    Infeasible,

    /// The problem is unbounded.
    Unbounded,

    /// Stopped by the time limit.
    TimeLimitReached,

    /// Stopped by the memory limit.
    MemoryLimitReached,

    /// Optimality proven.
    Optimum,

    /// Stopped by the node limit.
    NodeLimitReached,
}

status_display!(BcStatus {
    DidNotStart,
    Infeasible,
    Unbounded,
    TimeLimitReached,
    MemoryLimitReached,
    Optimum,
    NodeLimitReached,
});

impl BcStatus {
    /// Returns true for limit terminations.
    pub fn is_limit(&self) -> bool {
        matches!(
            self,
            BcStatus::TimeLimitReached | BcStatus::MemoryLimitReached | BcStatus::NodeLimitReached
        )
    }
}

/// Per-family cut statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CutFamilyLog {
    /// Family name.
    pub name: String,

    /// Cuts added by the family.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cut_count: Option<u64>,

    /// Invocations of the family's routine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cut_iterations: Option<u64>,

    /// Time spent in the family's routine.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "secs::option::serialize"
    )]
    pub cut_time: Option<Duration>,
}

/// Statistics of a branch-and-cut run.
///
/// Every statistic is optional; which ones are filled depends on the log
/// options enabled for the run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BcExecutionLog {
    /// Terminal status.
    pub status: BcStatus,

    /// Total time.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "secs::option::serialize"
    )]
    pub time: Option<Duration>,

    /// Constraints of the initial formulation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint_count: Option<u64>,

    /// Variables of the initial formulation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_count: Option<u64>,

    /// Open nodes at the end of the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes_open: Option<u64>,

    /// Nodes closed during the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes_closed: Option<u64>,

    /// Root relaxation value after cuts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_lp_value: Option<f64>,

    /// Value of the integer solution found at the root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_int_value: Option<f64>,

    /// Integer solution found at the root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_int_solution: Option<Valuation>,

    /// Best dual bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_bound: Option<f64>,

    /// Best integer solution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_int_solution: Option<Valuation>,

    /// Value of the best integer solution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_int_value: Option<f64>,

    /// Cuts added over all families.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cut_count: Option<u64>,

    /// Time separating over all families.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "secs::option::serialize"
    )]
    pub cut_time: Option<Duration>,

    /// Per-family breakdown, in registration order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cut_families: Option<Vec<CutFamilyLog>>,
}

impl BcExecutionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a terminal status has been set.
    pub fn is_finished(&self) -> bool {
        self.status != BcStatus::DidNotStart
    }
}

impl LogDocument for BcExecutionLog {
    const KD_TYPE: &'static str = "bc";
}
