//! Column generation loop controller.

use std::time::{Duration, Instant};

use super::{PricingContext, PricingRoutine};
use crate::error::{BcpError, BcpResult};
use crate::execution_log::{CgExecutionLog, CgIterationLog, CgOption, CgStatus};
use crate::model::RestrictedModel;
use crate::relaxation::{RelaxationResult, RelaxationSolver};
use crate::settings::{ColumnGenerationSettings, Deadline};

/// Column generation controller.
///
/// Owns the restricted model, the relaxation solver and the execution log.
/// The pricing routine is passed at call time. The loop can be driven one
/// iteration at a time with [`step`](Self::step) or to completion with
/// [`run`](Self::run); the log can be read between steps.
pub struct ColumnGeneration<S> {
    /// Restricted model, grown by every priced column.
    model: RestrictedModel,

    /// Relaxation solver.
    solver: S,

    /// Settings.
    settings: ColumnGenerationSettings,

    /// Execution log.
    log: CgExecutionLog,

    /// Last relaxation solved to optimality.
    last_relaxation: Option<RelaxationResult>,

    /// Started on the first step.
    deadline: Option<Deadline>,

    /// Iteration on which a run-time failure aborted the loop.
    aborted_at: Option<u64>,
}

impl<S: RelaxationSolver> ColumnGeneration<S> {
    /// Create a new column generation controller.
    pub fn new(model: RestrictedModel, solver: S, settings: ColumnGenerationSettings) -> Self {
        let log = CgExecutionLog {
            iterations: settings
                .has_option(CgOption::IterationsInformation)
                .then(Vec::new),
            ..Default::default()
        };
        Self {
            model,
            solver,
            settings,
            log,
            last_relaxation: None,
            deadline: None,
            aborted_at: None,
        }
    }

    /// Run until a terminal status is reached.
    pub fn run<P: PricingRoutine>(&mut self, pricing: &mut P) -> BcpResult<CgStatus> {
        loop {
            if let Some(status) = self.step(pricing)? {
                return Ok(status);
            }
        }
    }

    /// Solve the relaxation once, without pricing.
    pub fn run_without_pricing(&mut self) -> BcpResult<CgStatus> {
        let status = self.iterate(None)?;
        Ok(status.unwrap_or(self.log.status))
    }

    /// Perform one iteration.
    ///
    /// Returns Some(status) once the loop has terminated, None if another
    /// iteration is needed. Calling `step` after termination returns the
    /// terminal status again without doing any work. After a run-time
    /// failure every further call fails with [`BcpError::Aborted`].
    pub fn step<P: PricingRoutine>(&mut self, pricing: &mut P) -> BcpResult<Option<CgStatus>> {
        let pricing: &mut dyn PricingRoutine = pricing;
        self.iterate(Some(pricing))
    }

    /// Perform one iteration with no pricing routine; always terminal.
    pub fn step_without_pricing(&mut self) -> BcpResult<Option<CgStatus>> {
        self.iterate(None)
    }

    fn iterate(&mut self, pricing: Option<&mut dyn PricingRoutine>) -> BcpResult<Option<CgStatus>> {
        if self.log.is_finished() {
            return Ok(Some(self.log.status));
        }
        if let Some(iteration) = self.aborted_at {
            return Err(BcpError::Aborted { iteration });
        }

        let deadline = *self
            .deadline
            .get_or_insert_with(|| Deadline::start(self.settings.time_limit_ms));
        let iteration = self.log.iteration_count + 1;
        let iter_start = Instant::now();

        // Solve the restricted relaxation
        let lp_start = Instant::now();
        let time_limit = self.settings.time_limit().map(|_| deadline.remaining());
        let relaxation = match self.solver.solve(&self.model, time_limit) {
            Ok(relaxation) => relaxation,
            Err(source) => {
                self.aborted_at = Some(iteration);
                self.log.time = deadline.elapsed();
                return Err(BcpError::RelaxationFailure { iteration, source });
            }
        };
        let lp_time = lp_start.elapsed();

        self.log.iteration_count = iteration;
        self.log.lp_time += lp_time;
        let mut entry = CgIterationLog {
            iteration,
            lp_time,
            ..Default::default()
        };

        if let Some(status) = relaxation.status.terminal_status() {
            entry.time = iter_start.elapsed();
            self.push_entry(entry);
            return Ok(Some(self.finish(status, &deadline)));
        }

        let objective = relaxation.objective_value;
        entry.objective_value = Some(objective);
        self.log.incumbent_value = Some(objective);
        if self.settings.has_option(CgOption::IncumbentSolution) {
            self.log.incumbent = Some(relaxation.primal.clone());
        }

        if deadline.expired() {
            entry.time = iter_start.elapsed();
            self.push_entry(entry);
            self.last_relaxation = Some(relaxation);
            return Ok(Some(self.finish(CgStatus::TimeLimitReached, &deadline)));
        }

        let Some(pricing) = pricing else {
            entry.time = iter_start.elapsed();
            self.push_entry(entry);
            self.last_relaxation = Some(relaxation);
            return Ok(Some(self.finish(CgStatus::Optimum, &deadline)));
        };

        // Price out new columns
        let ctx = PricingContext {
            duals: &relaxation.duals,
            incumbent_value: objective,
            time_remaining: deadline.remaining(),
            iteration,
        };
        let pricing_start = Instant::now();
        let priced = pricing.price(&ctx, &mut entry.pricing_logs);
        let pricing_time = pricing_start.elapsed();

        entry.pricing_time = pricing_time;
        self.log.pricing_time += pricing_time;

        let columns = match priced {
            Ok(columns) => columns,
            Err(source) => {
                self.abort(entry, iter_start, &deadline);
                return Err(BcpError::PricingFailure { iteration, source });
            }
        };

        // The merge is all or nothing
        if let Err(err) = columns.iter().try_for_each(|c| self.model.check_column(c)) {
            self.abort(entry, iter_start, &deadline);
            return Err(err);
        }
        let column_count = columns.len() as u64;
        for column in columns {
            self.model.add_column(column)?;
        }
        entry.column_count = column_count;
        entry.time = iter_start.elapsed();
        self.log.columns_added += column_count;
        self.log.time = deadline.elapsed();
        self.push_entry(entry);
        self.last_relaxation = Some(relaxation);

        if self.settings.verbose && iteration % self.settings.log_freq.max(1) == 0 {
            log::info!(
                "CG iter {}: obj={:.6e}, columns={}, total={}, time={:.3}s",
                iteration,
                objective,
                column_count,
                self.model.num_variables(),
                self.log.time.as_secs_f64()
            );
        }

        if column_count == 0 {
            return Ok(Some(self.finish(CgStatus::Optimum, &deadline)));
        }
        Ok(None)
    }

    fn push_entry(&mut self, entry: CgIterationLog) {
        if let Some(iterations) = self.log.iterations.as_mut() {
            iterations.push(entry);
        }
    }

    fn abort(&mut self, mut entry: CgIterationLog, iter_start: Instant, deadline: &Deadline) {
        entry.time = iter_start.elapsed();
        self.aborted_at = Some(entry.iteration);
        self.push_entry(entry);
        self.log.time = deadline.elapsed();
        if self.settings.verbose {
            log::warn!("CG aborted on iteration {}", self.log.iteration_count);
        }
    }

    fn finish(&mut self, status: CgStatus, deadline: &Deadline) -> CgStatus {
        self.log.status = status;
        self.log.time = deadline.elapsed();
        if self.settings.verbose {
            log::info!(
                "CG finished: status={}, iterations={}, columns added={}, obj={:?}, time={:.3}s",
                status,
                self.log.iteration_count,
                self.log.columns_added,
                self.log.incumbent_value,
                self.log.time.as_secs_f64()
            );
        }
        status
    }

    /// Terminal status, `DidNotStart` while running.
    pub fn status(&self) -> CgStatus {
        self.log.status
    }

    /// Execution log as of now.
    pub fn log(&self) -> &CgExecutionLog {
        &self.log
    }

    /// Restricted model with every column added so far.
    pub fn model(&self) -> &RestrictedModel {
        &self.model
    }

    /// Last relaxation solved to optimality.
    pub fn last_relaxation(&self) -> Option<&RelaxationResult> {
        self.last_relaxation.as_ref()
    }

    /// Settings.
    pub fn settings(&self) -> &ColumnGenerationSettings {
        &self.settings
    }

    /// Iteration on which a run-time failure aborted the loop, if any.
    pub fn aborted_at(&self) -> Option<u64> {
        self.aborted_at
    }

    /// Elapsed time since the first step.
    pub fn elapsed(&self) -> Duration {
        self.deadline.map(|d| d.elapsed()).unwrap_or_default()
    }

    /// Consume the controller, returning the model and the log.
    pub fn into_parts(self) -> (RestrictedModel, CgExecutionLog) {
        (self.model, self.log)
    }
}
