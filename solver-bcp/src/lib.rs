//! Control loops for branch-cut-price solvers.
//!
//! This crate provides the orchestration layer around an external LP/MIP
//! solver:
//!
//! - **Cut separation**: a registry of cut families with per-family limits,
//!   fallback dependencies between families, and a deterministic scheduler
//!   for the separation rounds requested by the solver
//! - **Column generation**: a loop alternating restricted relaxation solves
//!   and a user pricing routine
//! - **Branch-and-cut sessions**: limit checks, incumbent tracking and root
//!   statistics for a solver-driven search
//! - **Execution logs**: structured statistics of every run, serialized to
//!   JSON with a `kd_type` discriminant
//!
//! # Example
//!
//! ```
//! use solver_bcp::cuts::{LimitKind, SeparationStrategy};
//! use solver_bcp::error::RoutineError;
//! use solver_bcp::model::{Constraint, Valuation, Variable};
//!
//! let mut strategy = SeparationStrategy::new();
//! strategy.register_family("clique")?;
//! strategy.register_family("odd-hole")?;
//! strategy.set_limit("clique", LimitKind::CutsPerIteration, 3)?;
//! // Try odd holes only when no clique inequality was found.
//! strategy.add_dependency("clique", "odd-hole")?;
//!
//! strategy.set_routine(
//!     "clique",
//!     |_x: &Valuation, _node: u64, _cap: usize, _bound: f64| -> Result<Vec<Constraint>, RoutineError> {
//!         Ok(vec![Constraint::leq(vec![(Variable(0), 1.0), (Variable(1), 1.0)], 1.0)])
//!     },
//! )?;
//! strategy.set_routine(
//!     "odd-hole",
//!     |_x: &Valuation, _node: u64, _cap: usize, _bound: f64| -> Result<Vec<Constraint>, RoutineError> {
//!         Ok(Vec::new())
//!     },
//! )?;
//!
//! let round = strategy.separate(&Valuation::new(vec![0.6, 0.6]), 0, None, 0.0)?;
//! assert_eq!(round.cuts.len(), 1);
//! assert!(!round.was_invoked(strategy.id("odd-hole").unwrap()));
//! # Ok::<(), solver_bcp::error::BcpError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bc;
pub mod colgen;
pub mod cuts;
pub mod error;
pub mod execution_log;
pub mod model;
pub mod relaxation;
pub mod settings;

// Re-export main types
pub use bc::BranchAndCutSession;
pub use colgen::{ColumnGeneration, PricingContext, PricingRoutine};
pub use cuts::{LimitKind, SeparationRoutine, SeparationStrategy, StrategyConfig};
pub use error::{BcpError, BcpResult, RoutineError};
pub use execution_log::{
    BcExecutionLog, BcStatus, BcpExecutionLog, CgExecutionLog, CgStatus, ExecutionLog,
    LogDocument,
};
pub use model::{Column, Constraint, RestrictedModel, Valuation, Variable};
pub use relaxation::{RelaxationResult, RelaxationSolver, RelaxationStatus};
pub use settings::{BranchAndCutSettings, ColumnGenerationSettings};
