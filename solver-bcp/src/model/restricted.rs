//! Restricted master model for column generation.

use super::{Column, Constraint, Variable};
use crate::error::{BcpError, BcpResult};

/// Variable data stored in a restricted model.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableInfo {
    /// Variable name.
    pub name: String,

    /// Objective coefficient.
    pub objective: f64,

    /// Lower bound.
    pub lower: f64,

    /// Upper bound.
    pub upper: f64,
}

/// Minimization model holding the columns materialized so far.
///
/// The relaxation solver reads it; the column generation loop grows it.
#[derive(Debug, Clone, Default)]
pub struct RestrictedModel {
    variables: Vec<VariableInfo>,
    constraints: Vec<Constraint>,
}

impl RestrictedModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable and return its identifier.
    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        objective: f64,
        lower: f64,
        upper: f64,
    ) -> Variable {
        let var = Variable(self.variables.len());
        self.variables.push(VariableInfo {
            name: name.into(),
            objective,
            lower,
            upper,
        });
        var
    }

    /// Add a constraint and return its row index.
    ///
    /// Every variable in the constraint must already exist.
    pub fn add_constraint(&mut self, constraint: Constraint) -> BcpResult<usize> {
        if let Some(&(var, _)) = constraint
            .terms
            .iter()
            .find(|(v, _)| v.index() >= self.variables.len())
        {
            return Err(BcpError::InvalidModel(format!(
                "constraint references {} but the model has {} variables",
                var,
                self.variables.len()
            )));
        }
        self.constraints.push(constraint);
        Ok(self.constraints.len() - 1)
    }

    /// Check that every row a column references exists.
    pub fn check_column(&self, column: &Column) -> BcpResult<()> {
        let m = self.constraints.len();
        match column.entries.iter().find(|(row, _)| *row >= m) {
            Some(&(row, _)) => Err(BcpError::InvalidModel(format!(
                "column {} references row {} but the model has {} constraints",
                column.name, row, m
            ))),
            None => Ok(()),
        }
    }

    /// Add a column: a new variable plus its coefficients in existing rows.
    pub fn add_column(&mut self, column: Column) -> BcpResult<Variable> {
        self.check_column(&column)?;
        let var = self.add_variable(column.name, column.objective, column.lower, column.upper);
        for (row, coef) in column.entries {
            self.constraints[row].terms.push((var, coef));
        }
        Ok(var)
    }

    /// Number of variables.
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Number of constraints.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// All variables in index order.
    pub fn variables(&self) -> &[VariableInfo] {
        &self.variables
    }

    /// All constraints in row order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Variable data by identifier.
    pub fn variable(&self, var: Variable) -> Option<&VariableInfo> {
        self.variables.get(var.index())
    }
}
