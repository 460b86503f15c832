//! Cut families: a named detector with its limits and running counters.

use std::time::Duration;

use crate::error::RoutineError;
use crate::model::{Constraint, Valuation};

/// Detector of violated inequalities of one family.
///
/// The scheduler calls `separate` with the current point, the node number,
/// the maximum number of constraints it will accept from this call, and the
/// node's dual bound. Implementations may keep private state (a precomputed
/// graph, say) but must not depend on scheduler internals.
pub trait SeparationRoutine {
    /// Return violated constraints for `x`, at most `cut_limit` of them.
    fn separate(
        &mut self,
        x: &Valuation,
        node_number: u64,
        cut_limit: usize,
        node_bound: f64,
    ) -> Result<Vec<Constraint>, RoutineError>;
}

impl<F> SeparationRoutine for F
where
    F: FnMut(&Valuation, u64, usize, f64) -> Result<Vec<Constraint>, RoutineError>,
{
    fn separate(
        &mut self,
        x: &Valuation,
        node_number: u64,
        cut_limit: usize,
        node_bound: f64,
    ) -> Result<Vec<Constraint>, RoutineError> {
        self(x, node_number, cut_limit, node_bound)
    }
}

/// Position of a family in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FamilyId(pub usize);

/// Kind of per-family limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitKind {
    /// Only separate at nodes numbered up to this value.
    Node,

    /// Maximum number of invocations over the whole solve.
    Iteration,

    /// Maximum number of cuts over the whole solve.
    Cut,

    /// Maximum number of cuts accepted from one invocation.
    CutsPerIteration,
}

/// Configured limits of a family. `None` means unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FamilyLimits {
    /// Highest node number at which the family is attempted.
    pub node_limit: Option<u64>,

    /// Maximum invocations.
    pub iteration_limit: Option<u64>,

    /// Maximum cuts in total.
    pub cut_limit: Option<u64>,

    /// Maximum cuts per invocation.
    pub cuts_per_iteration: Option<u64>,
}

impl FamilyLimits {
    /// Overwrite one limit.
    pub fn set(&mut self, kind: LimitKind, value: Option<u64>) {
        match kind {
            LimitKind::Node => self.node_limit = value,
            LimitKind::Iteration => self.iteration_limit = value,
            LimitKind::Cut => self.cut_limit = value,
            LimitKind::CutsPerIteration => self.cuts_per_iteration = value,
        }
    }

    /// Read one limit.
    pub fn get(&self, kind: LimitKind) -> Option<u64> {
        match kind {
            LimitKind::Node => self.node_limit,
            LimitKind::Iteration => self.iteration_limit,
            LimitKind::Cut => self.cut_limit,
            LimitKind::CutsPerIteration => self.cuts_per_iteration,
        }
    }
}

/// Running counters of a family. Non-decreasing during a solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FamilyStats {
    /// Cuts returned to the solver.
    pub cuts_added: u64,

    /// Invocations of the routine.
    pub iterations_run: u64,

    /// Wall-clock time spent inside the routine.
    pub time_spent: Duration,
}

/// A registered cut family.
pub struct CutFamily {
    pub(crate) name: String,
    pub(crate) routine: Option<Box<dyn SeparationRoutine>>,
    pub(crate) limits: FamilyLimits,
    pub(crate) stats: FamilyStats,
}

impl CutFamily {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            routine: None,
            limits: FamilyLimits::default(),
            stats: FamilyStats::default(),
        }
    }

    /// Family name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configured limits.
    pub fn limits(&self) -> &FamilyLimits {
        &self.limits
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> &FamilyStats {
        &self.stats
    }

    /// Whether a routine is bound.
    pub fn has_routine(&self) -> bool {
        self.routine.is_some()
    }
}

impl std::fmt::Debug for CutFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CutFamily")
            .field("name", &self.name)
            .field("has_routine", &self.routine.is_some())
            .field("limits", &self.limits)
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_default_unlimited() {
        let limits = FamilyLimits::default();
        for kind in [
            LimitKind::Node,
            LimitKind::Iteration,
            LimitKind::Cut,
            LimitKind::CutsPerIteration,
        ] {
            assert_eq!(limits.get(kind), None);
        }
    }

    #[test]
    fn test_limit_overwrite() {
        let mut limits = FamilyLimits::default();
        limits.set(LimitKind::Cut, Some(500));
        limits.set(LimitKind::Cut, Some(20));
        assert_eq!(limits.cut_limit, Some(20));
        limits.set(LimitKind::Cut, None);
        assert_eq!(limits.cut_limit, None);
    }

    #[test]
    fn test_closure_routine() {
        let mut calls = 0;
        let mut routine = |_: &Valuation,
                           _: u64,
                           limit: usize,
                           _: f64|
         -> Result<Vec<Constraint>, RoutineError> {
            calls += 1;
            Ok(vec![Constraint::leq(vec![], 0.0); limit.min(2)])
        };
        let cuts = routine
            .separate(&Valuation::default(), 0, 5, 0.0)
            .unwrap();
        assert_eq!(cuts.len(), 2);
        drop(routine);
        assert_eq!(calls, 1);
    }
}
