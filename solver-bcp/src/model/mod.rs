//! Model boundary types shared with the external solver.

mod constraint;
mod restricted;
mod valuation;

pub use constraint::{Column, Constraint, Sense};
pub use restricted::{RestrictedModel, VariableInfo};
pub use valuation::{Valuation, Variable};
