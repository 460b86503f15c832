//! Branch-and-cut session driven by an external solver's callbacks.

use super::IncumbentTracker;
use crate::cuts::{SeparationRound, SeparationStrategy};
use crate::error::{BcpError, BcpResult};
use crate::execution_log::{BcExecutionLog, BcOption, BcStatus};
use crate::model::Valuation;
use crate::settings::{BranchAndCutSettings, Deadline};

/// Bookkeeping of one branch-and-cut run.
///
/// The external integer solver owns the tree; it calls into the session
/// when it needs cuts, closes a node, finds an integer solution or moves
/// its bound. The session runs the separation rounds, checks the limits
/// and builds the execution log.
pub struct BranchAndCutSession {
    /// Families, limits and counters.
    strategy: SeparationStrategy,

    /// Incumbent solution tracker.
    pub incumbent: IncumbentTracker,

    /// Integer solution found before the first node was closed.
    root_int: Option<(Valuation, f64)>,

    /// Root relaxation value after cuts.
    root_lp_value: Option<f64>,

    /// Best dual bound reported by the solver.
    best_bound: Option<f64>,

    /// Size of the initial formulation.
    constraint_count: Option<u64>,
    variable_count: Option<u64>,

    /// Nodes closed.
    nodes_closed: u64,

    /// Separation rounds run.
    rounds: u64,

    /// Run clock.
    deadline: Deadline,

    /// Settings.
    settings: BranchAndCutSettings,
}

impl BranchAndCutSession {
    /// Create a session. Every family of `strategy` must have a routine.
    pub fn new(strategy: SeparationStrategy, settings: BranchAndCutSettings) -> BcpResult<Self> {
        strategy.validate()?;
        Ok(Self {
            strategy,
            incumbent: IncumbentTracker::new(),
            root_int: None,
            root_lp_value: None,
            best_bound: None,
            constraint_count: None,
            variable_count: None,
            nodes_closed: 0,
            rounds: 0,
            deadline: Deadline::start(settings.time_limit_ms),
            settings,
        })
    }

    /// Record the initial formulation and restart the clock.
    pub fn start(&mut self, constraint_count: usize, variable_count: usize) {
        self.constraint_count = Some(constraint_count as u64);
        self.variable_count = Some(variable_count as u64);
        self.deadline = Deadline::start(self.settings.time_limit_ms);

        if self.settings.verbose {
            log::info!(
                "B&C start: {} constraints, {} variables, {} cut families",
                constraint_count,
                variable_count,
                self.strategy.len()
            );
        }
    }

    /// Run one separation round at `x` on node `node_number`.
    pub fn separate(
        &mut self,
        x: &Valuation,
        node_number: u64,
        node_bound: f64,
    ) -> BcpResult<SeparationRound> {
        if let Some(n) = self.variable_count {
            if (x.len() as u64) < n {
                return Err(BcpError::InvalidModel(format!(
                    "valuation has {} values but the model has {} variables",
                    x.len(),
                    n
                )));
            }
        }

        let round = self.strategy.separate(
            x,
            node_number,
            self.settings.round_cut_budget,
            node_bound,
        )?;
        self.rounds += 1;

        log::debug!(
            "node {}: round {} produced {} cuts ({} families invoked, {} skipped)",
            node_number,
            self.rounds,
            round.cuts.len(),
            round.invoked.len(),
            round.skipped.len()
        );
        Ok(round)
    }

    /// Mark a node as closed.
    pub fn node_closed(&mut self) {
        self.nodes_closed += 1;
    }

    /// Update incumbent with a new integer solution.
    ///
    /// Returns true if the incumbent was improved.
    pub fn update_incumbent(&mut self, x: &Valuation, obj: f64) -> bool {
        let improved = self.incumbent.update(x, obj);

        if improved {
            if self.nodes_closed == 0 {
                self.root_int = Some((x.clone(), obj));
            }
            if self.settings.verbose {
                log::info!(
                    "New incumbent: obj={:.6e} after {} nodes",
                    obj,
                    self.nodes_closed
                );
            }
        }

        improved
    }

    /// Record the root relaxation value after cuts.
    pub fn set_root_relaxation(&mut self, value: f64) {
        self.root_lp_value = Some(value);
        if self.best_bound.is_none() {
            self.best_bound = Some(value);
        }
    }

    /// Record the solver's current dual bound.
    pub fn update_best_bound(&mut self, bound: f64) {
        self.best_bound = Some(bound);
    }

    /// Check termination conditions.
    ///
    /// Returns Some(status) if the solver should stop, None otherwise.
    pub fn check_termination(&self, open_nodes: u64) -> Option<BcStatus> {
        self.log_progress(open_nodes);

        // Time limit
        if self.deadline.expired() {
            return Some(BcStatus::TimeLimitReached);
        }

        // Node limit
        if let Some(max_nodes) = self.settings.max_nodes {
            if self.nodes_closed >= max_nodes {
                return Some(BcStatus::NodeLimitReached);
            }
        }

        None
    }

    /// Build the execution log for the run ending with `status`.
    pub fn finalize(&self, status: BcStatus, open_nodes: u64) -> BcExecutionLog {
        let mut log = BcExecutionLog {
            status,
            time: Some(self.deadline.elapsed()),
            constraint_count: self.constraint_count,
            variable_count: self.variable_count,
            nodes_open: Some(open_nodes),
            nodes_closed: Some(self.nodes_closed),
            best_bound: self.best_bound,
            best_int_value: self.incumbent.value(),
            ..Default::default()
        };

        if self.settings.has_option(BcOption::RootInformation) {
            log.root_lp_value = self.root_lp_value;
            if let Some((x, value)) = &self.root_int {
                log.root_int_value = Some(*value);
                log.root_int_solution = Some(x.clone());
            }
        }

        if self.settings.has_option(BcOption::BestIntSolution) {
            log.best_int_solution = self.incumbent.solution.clone();
        }

        if self.settings.has_option(BcOption::CutInformation) {
            log.cut_count = Some(self.strategy.total_cuts());
            log.cut_time = Some(self.strategy.total_time());
            log.cut_families = Some(self.strategy.family_logs());
        }

        if self.settings.verbose {
            log::info!(
                "B&C finished: status={}, nodes={}, incumbent={:?}, cuts={}, time={:.3}s",
                status,
                self.nodes_closed,
                log.best_int_value,
                self.strategy.total_cuts(),
                self.deadline.elapsed().as_secs_f64()
            );
        }

        log
    }

    /// Log progress (if verbose).
    fn log_progress(&self, open_nodes: u64) {
        if !self.settings.verbose || self.nodes_closed % self.settings.log_freq.max(1) != 0 {
            return;
        }

        let bound = self.best_bound.unwrap_or(f64::NEG_INFINITY);
        log::info!(
            "Nodes: {} ({} open) | Bound: {:.6e} | Incumbent: {:.6e} | Gap: {:.2}% | Cuts: {} | Time: {:.1}s",
            self.nodes_closed,
            open_nodes,
            bound,
            self.incumbent.obj_val,
            self.incumbent.gap(bound) * 100.0,
            self.strategy.total_cuts(),
            self.deadline.elapsed().as_secs_f64(),
        );
    }

    /// Families, limits and counters.
    pub fn strategy(&self) -> &SeparationStrategy {
        &self.strategy
    }

    /// Nodes closed so far.
    pub fn nodes_closed(&self) -> u64 {
        self.nodes_closed
    }

    /// Separation rounds run so far.
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Best dual bound reported so far.
    pub fn best_bound(&self) -> Option<f64> {
        self.best_bound
    }

    /// Consume the session, returning the strategy with its counters.
    pub fn into_strategy(self) -> SeparationStrategy {
        self.strategy
    }
}
