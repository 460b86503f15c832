//! Column generation.
//!
//! The loop alternates between solving the restricted relaxation and
//! pricing out columns with negative reduced cost:
//!
//! 1. Solve the relaxation of the restricted model
//! 2. Stop if the relaxation is not optimal or the time limit has elapsed
//! 3. Call the pricing routine with the duals
//! 4. Add the returned columns; stop with `Optimum` when there are none

mod pricing;
mod solver;

pub use pricing::{PricingContext, PricingRoutine};
pub use solver::ColumnGeneration;
