//! Variable identifiers and point valuations.

use serde::{Deserialize, Serialize};

use crate::error::{BcpError, BcpResult};

/// Index of a variable in a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variable(pub usize);

impl Variable {
    /// Position of the variable in a valuation.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// Snapshot of the value of every variable at a point of the search.
///
/// Owned by the external solver and handed to routines read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Valuation {
    values: Vec<f64>,
}

impl Valuation {
    /// Create a valuation from dense values, one per variable.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Value of `var`, or `None` if the valuation does not cover it.
    #[inline]
    pub fn get(&self, var: Variable) -> Option<f64> {
        self.values.get(var.index()).copied()
    }

    /// Value of `var`, failing if it does not resolve.
    pub fn value(&self, var: Variable) -> BcpResult<f64> {
        self.get(var).ok_or_else(|| {
            BcpError::InvalidModel(format!(
                "variable {} not covered by valuation of {} values",
                var,
                self.values.len()
            ))
        })
    }

    /// Number of variables covered.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the valuation is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(variable, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, f64)> + '_ {
        self.values.iter().enumerate().map(|(i, &v)| (Variable(i), v))
    }

    /// Raw values in index order.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

impl std::ops::Index<Variable> for Valuation {
    type Output = f64;

    fn index(&self, var: Variable) -> &f64 {
        &self.values[var.index()]
    }
}

impl From<Vec<f64>> for Valuation {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let x = Valuation::new(vec![0.5, 1.0]);
        assert_eq!(x.get(Variable(1)), Some(1.0));
        assert_eq!(x.get(Variable(2)), None);
        assert_eq!(x[Variable(0)], 0.5);
        assert!(x.value(Variable(2)).is_err());
    }

    #[test]
    fn test_serializes_as_array() {
        let x = Valuation::new(vec![0.0, 1.5]);
        assert_eq!(serde_json::to_string(&x).unwrap(), "[0.0,1.5]");
    }
}
