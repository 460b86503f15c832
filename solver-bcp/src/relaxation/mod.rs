//! Restricted relaxation (LP) solving.

mod backend;

pub use backend::{RelaxationResult, RelaxationSolver, RelaxationStatus};
