//! Linear constraints and columns.

use super::{Valuation, Variable};

/// Sense of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// a^T x <= rhs
    Leq,

    /// a^T x >= rhs
    Geq,

    /// a^T x == rhs
    Eq,
}

/// A linear constraint over model variables.
///
/// Produced by separation routines as cuts and stored as rows of a
/// restricted model.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Sparse coefficients.
    pub terms: Vec<(Variable, f64)>,

    /// Constraint sense.
    pub sense: Sense,

    /// Right-hand side.
    pub rhs: f64,

    /// Optional name for debugging.
    pub name: Option<String>,
}

impl Constraint {
    /// Create a constraint.
    pub fn new(terms: Vec<(Variable, f64)>, sense: Sense, rhs: f64) -> Self {
        Self {
            terms,
            sense,
            rhs,
            name: None,
        }
    }

    /// a^T x <= rhs.
    pub fn leq(terms: Vec<(Variable, f64)>, rhs: f64) -> Self {
        Self::new(terms, Sense::Leq, rhs)
    }

    /// a^T x >= rhs.
    pub fn geq(terms: Vec<(Variable, f64)>, rhs: f64) -> Self {
        Self::new(terms, Sense::Geq, rhs)
    }

    /// a^T x == rhs.
    pub fn eq(terms: Vec<(Variable, f64)>, rhs: f64) -> Self {
        Self::new(terms, Sense::Eq, rhs)
    }

    /// Attach a name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Left-hand side value at `x`. Variables not covered by `x` count as zero.
    pub fn lhs(&self, x: &Valuation) -> f64 {
        self.terms
            .iter()
            .map(|&(var, coef)| coef * x.get(var).unwrap_or(0.0))
            .sum()
    }

    /// Amount by which `x` violates the constraint (positive means violated).
    pub fn violation(&self, x: &Valuation) -> f64 {
        let lhs = self.lhs(x);
        match self.sense {
            Sense::Leq => lhs - self.rhs,
            Sense::Geq => self.rhs - lhs,
            Sense::Eq => (lhs - self.rhs).abs(),
        }
    }

    /// Check if the constraint is violated by more than `tol`.
    pub fn is_violated(&self, x: &Valuation, tol: f64) -> bool {
        self.violation(x) > tol
    }
}

/// A new variable together with its coefficients in the existing rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Variable name.
    pub name: String,

    /// Objective coefficient.
    pub objective: f64,

    /// Lower bound.
    pub lower: f64,

    /// Upper bound.
    pub upper: f64,

    /// Coefficients as `(row index, value)` pairs.
    pub entries: Vec<(usize, f64)>,
}

impl Column {
    /// Create a column with bounds `[0, +inf)`.
    pub fn new(name: impl Into<String>, objective: f64, entries: Vec<(usize, f64)>) -> Self {
        Self {
            name: name.into(),
            objective,
            lower: 0.0,
            upper: f64::INFINITY,
            entries,
        }
    }

    /// Set variable bounds.
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower = lower;
        self.upper = upper;
        self
    }
}
