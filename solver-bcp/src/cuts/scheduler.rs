//! Separation round scheduling.
//!
//! One round walks the families in dependency order, decides for each one
//! whether it may run, invokes the eligible routines with a per-call cap and
//! collects the returned cuts.
//!
//! The eligibility decision ([`plan_family`]) is a pure function of the
//! family's limits and counters, the node number, the families that already
//! produced cuts this round and the remaining round budget.

use std::time::{Duration, Instant};

use fixedbitset::FixedBitSet;

use super::family::{FamilyId, FamilyLimits, FamilyStats};
use super::strategy::SeparationStrategy;
use crate::error::{BcpError, BcpResult};
use crate::model::{Constraint, Valuation};

/// Why a family was not invoked in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Node number is above the family's node limit.
    NodeLimit,

    /// Family already ran its maximum number of iterations.
    IterationLimit,

    /// Family already added its maximum number of cuts.
    CutLimit,

    /// A prerequisite produced cuts in this round.
    Dependency {
        /// First prerequisite (in edge insertion order) that produced cuts.
        prerequisite: FamilyId,
    },

    /// The computed per-call cap is zero.
    ZeroCap,
}

/// Outcome of the eligibility check for one family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilyDecision {
    /// Invoke the routine accepting at most `cap` cuts.
    Run {
        /// Per-call cut cap.
        cap: usize,
    },

    /// Do not invoke the routine.
    Skip(SkipReason),
}

/// Decide whether a family runs and with which cap.
///
/// `blocked_by` is a prerequisite that already produced cuts this round, if
/// any. `budget_remaining` is what is left of the round's cut budget.
pub fn plan_family(
    limits: &FamilyLimits,
    stats: &FamilyStats,
    node_number: u64,
    blocked_by: Option<FamilyId>,
    budget_remaining: usize,
) -> FamilyDecision {
    if limits.node_limit.is_some_and(|k| node_number > k) {
        return FamilyDecision::Skip(SkipReason::NodeLimit);
    }
    if limits
        .iteration_limit
        .is_some_and(|k| stats.iterations_run >= k)
    {
        return FamilyDecision::Skip(SkipReason::IterationLimit);
    }
    if limits.cut_limit.is_some_and(|k| stats.cuts_added >= k) {
        return FamilyDecision::Skip(SkipReason::CutLimit);
    }
    if let Some(prerequisite) = blocked_by {
        return FamilyDecision::Skip(SkipReason::Dependency { prerequisite });
    }

    let per_call = limits.cuts_per_iteration.map_or(usize::MAX, to_cap);
    let left = limits
        .cut_limit
        .map_or(usize::MAX, |k| to_cap(k - stats.cuts_added));
    let cap = per_call.min(left).min(budget_remaining);

    if cap == 0 {
        FamilyDecision::Skip(SkipReason::ZeroCap)
    } else {
        FamilyDecision::Run { cap }
    }
}

fn to_cap(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// One invocation performed during a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Family invoked.
    pub family: FamilyId,

    /// Cap passed to the routine.
    pub cap: usize,

    /// Cuts accepted from the routine.
    pub cuts: usize,

    /// Time spent in the routine.
    pub time: Duration,
}

/// Result of one separation round.
#[derive(Debug, Clone, Default)]
pub struct SeparationRound {
    /// Violated constraints, in discovery order.
    pub cuts: Vec<Constraint>,

    /// Invocations, in execution order.
    pub invoked: Vec<Invocation>,

    /// Families considered but not invoked, in order.
    pub skipped: Vec<(FamilyId, SkipReason)>,

    /// The round stopped because its cut budget reached zero.
    pub budget_exhausted: bool,
}

impl SeparationRound {
    /// Whether `family` was invoked in this round.
    pub fn was_invoked(&self, family: FamilyId) -> bool {
        self.invoked.iter().any(|inv| inv.family == family)
    }

    /// Why `family` was skipped in this round, if it was.
    pub fn skip_reason(&self, family: FamilyId) -> Option<SkipReason> {
        self.skipped
            .iter()
            .find(|(id, _)| *id == family)
            .map(|&(_, reason)| reason)
    }
}

impl SeparationStrategy {
    /// Run one separation round at `x`.
    ///
    /// `round_budget` caps the number of cuts returned by the whole round
    /// (`None` = unlimited). Counters of every invoked family are updated.
    /// A failing routine aborts the round with `SeparationFailure`; counter
    /// updates made up to that point are kept.
    pub fn separate(
        &mut self,
        x: &Valuation,
        node_number: u64,
        round_budget: Option<usize>,
        node_bound: f64,
    ) -> BcpResult<SeparationRound> {
        let mut round = SeparationRound::default();
        let mut produced = FixedBitSet::with_capacity(self.families.len());
        let mut budget = round_budget.unwrap_or(usize::MAX);

        for position in 0..self.order.len() {
            if budget == 0 {
                break;
            }
            let id = self.order[position];
            let blocked_by = self
                .graph
                .predecessors(id.0)
                .iter()
                .copied()
                .find(|&p| produced.contains(p))
                .map(FamilyId);

            let family = &mut self.families[id.0];
            let decision = plan_family(
                &family.limits,
                &family.stats,
                node_number,
                blocked_by,
                budget,
            );
            let cap = match decision {
                FamilyDecision::Run { cap } => cap,
                FamilyDecision::Skip(reason) => {
                    log::debug!("node {}: skipping {} ({:?})", node_number, family.name, reason);
                    round.skipped.push((id, reason));
                    continue;
                }
            };

            let Some(routine) = family.routine.as_mut() else {
                return Err(BcpError::MissingRoutine(family.name.clone()));
            };

            let start = Instant::now();
            let result = routine.separate(x, node_number, cap, node_bound);
            let elapsed = start.elapsed();

            family.stats.time_spent += elapsed;
            family.stats.iterations_run += 1;

            let mut cuts = result.map_err(|source| BcpError::SeparationFailure {
                family: family.name.clone(),
                iteration: family.stats.iterations_run,
                source,
            })?;

            if cuts.len() > cap {
                log::warn!(
                    "family {} returned {} cuts with a cap of {}; extra cuts dropped",
                    family.name,
                    cuts.len(),
                    cap
                );
                cuts.truncate(cap);
            }

            family.stats.cuts_added += cuts.len() as u64;
            log::debug!(
                "node {}: {} found {} cuts in {:.3}s",
                node_number,
                family.name,
                cuts.len(),
                elapsed.as_secs_f64()
            );

            if !cuts.is_empty() {
                produced.insert(id.0);
            }
            budget -= cuts.len();
            round.invoked.push(Invocation {
                family: id,
                cap,
                cuts: cuts.len(),
                time: elapsed,
            });
            round.cuts.extend(cuts);
        }

        round.budget_exhausted = budget == 0;
        Ok(round)
    }
}
